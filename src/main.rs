//! Command-line interface for bq-migrate
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate the CREATE TABLE DDL of the new table
//! bq-migrate create-table --config migration.yaml --discover-result discover.json
//!
//! # Generate the query returning the existing table's DDL
//! bq-migrate fetch-ddl --config migration.yaml
//!
//! # Generate the copy statement once the existing DDL has been fetched
//! bq-migrate copy-rows --config migration.yaml --source-ddl dataflow_table.sql
//!
//! # All of the above
//! bq-migrate dry-run --config migration.yaml \
//!   --discover-result discover.json --source-ddl dataflow_table.sql
//!
//! # Copy statement between any two tables
//! bq-migrate copy-rows-sql --source-ddl a.sql --destination-ddl b.sql --output copy.sql
//! ```

use anyhow::Context;
use bq_migrate::{copy_rows_between, ConfigOverrides, MigrationConfig, MigrationPlan};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bq-migrate")]
#[command(about = "Generate SQL migrating a Dataflow-replicated table to Datastream's BigQuery destination")]
#[command(long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Migration config file and its overrides
#[derive(Args)]
struct ConfigArgs {
    /// Migration config (YAML)
    #[arg(long, value_name = "PATH", env = "BQ_MIGRATE_CONFIG")]
    config: PathBuf,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

impl ConfigArgs {
    fn plan(&self) -> anyhow::Result<MigrationPlan> {
        let mut config = MigrationConfig::from_file(&self.config)
            .with_context(|| format!("Failed to load config from {:?}", self.config))?;
        self.overrides.apply(&mut config);
        MigrationPlan::new(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the CREATE TABLE DDL from a Datastream discover result
    CreateTable {
        #[command(flatten)]
        config: ConfigArgs,

        /// Discover result JSON for the source table
        #[arg(long, value_name = "PATH")]
        discover_result: PathBuf,
    },

    /// Generate the query fetching the existing BigQuery table's DDL
    FetchDdl {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Generate the INSERT ... SELECT copying rows into the new table
    CopyRows {
        #[command(flatten)]
        config: ConfigArgs,

        /// DDL of the existing BigQuery table
        #[arg(long, value_name = "PATH")]
        source_ddl: PathBuf,
    },

    /// Generate every file of the migration
    DryRun {
        #[command(flatten)]
        config: ConfigArgs,

        /// Discover result JSON for the source table
        #[arg(long, value_name = "PATH")]
        discover_result: PathBuf,

        /// DDL of the existing BigQuery table
        #[arg(long, value_name = "PATH")]
        source_ddl: PathBuf,
    },

    /// Generate the copy statement between two tables given by their DDL
    CopyRowsSql {
        /// DDL of the table rows are read from
        #[arg(long, value_name = "PATH")]
        source_ddl: PathBuf,

        /// DDL of the table rows are written to
        #[arg(long, value_name = "PATH")]
        destination_ddl: PathBuf,

        /// Where to write the statement
        #[arg(long, value_name = "PATH")]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::CreateTable {
            config,
            discover_result,
        } => {
            let plan = config.plan()?;
            let path = plan.create_table(&discover_result)?;
            println!("{}", path.display());
        }
        Commands::FetchDdl { config } => {
            let path = config.plan()?.fetch_ddl()?;
            println!("{}", path.display());
        }
        Commands::CopyRows { config, source_ddl } => {
            let path = config.plan()?.copy_rows(&source_ddl)?;
            println!("{}", path.display());
        }
        Commands::DryRun {
            config,
            discover_result,
            source_ddl,
        } => {
            let summary = config.plan()?.dry_run(&discover_result, &source_ddl)?;
            println!("{}", summary.create_target_table.display());
            println!("{}", summary.fetch_source_table_ddl.display());
            println!("{}", summary.copy_rows.display());
        }
        Commands::CopyRowsSql {
            source_ddl,
            destination_ddl,
            output,
        } => {
            copy_rows_between(&source_ddl, &destination_ddl, &output)?;
            println!("{}", output.display());
        }
    }

    Ok(())
}
