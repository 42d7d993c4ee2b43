//! Offline migration steps.
//!
//! Each step reads its inputs from files and writes the generated SQL under
//! the output directory. Running the statements against BigQuery is left to
//! the caller (`bq query < file.sql`).

use crate::config::MigrationConfig;
use crate::output::{read_input, write_output, OutputPaths};
use anyhow::Context;
use bq_ddl::{
    fetch_table_ddl_sql, generate_copy_rows_sql_from_ddl, CreateTableGenerator, TableTarget,
};
use discover::DiscoverResult;
use std::path::{Path, PathBuf};

/// Generated files of a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunSummary {
    pub create_target_table: PathBuf,
    pub fetch_source_table_ddl: PathBuf,
    pub copy_rows: PathBuf,
}

/// One table migration, resolved from its config.
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    config: MigrationConfig,
    generator: CreateTableGenerator,
    target: TableTarget,
    paths: OutputPaths,
}

impl MigrationPlan {
    pub fn new(config: MigrationConfig) -> anyhow::Result<Self> {
        config.validate().context("Invalid migration config")?;

        let generator = CreateTableGenerator::new(
            config.source_type,
            config.project_id.clone(),
            config.destination.naming(),
            config.max_staleness_seconds,
        );
        let target = generator.target(&config.source_schema_name, &config.source_table_name);
        let paths = OutputPaths::new(&config, &target.fully_qualified());
        tracing::debug!("Migration of {target} uses config {config:?}");

        Ok(Self {
            config,
            generator,
            target,
            paths,
        })
    }

    /// BigQuery table the migration creates.
    pub fn target(&self) -> &TableTarget {
        &self.target
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// The existing table rows are copied from.
    pub fn source_table(&self) -> TableTarget {
        TableTarget::new(
            self.config.project_id.clone(),
            self.config.bigquery_source_dataset_name.clone(),
            self.config.bigquery_source_table_name.clone(),
        )
    }

    /// Generate the target table DDL from a saved discover result.
    ///
    /// Nothing is written unless the DDL is generated.
    pub fn create_table(&self, discover_result: &Path) -> anyhow::Result<PathBuf> {
        let text = read_input(discover_result)?;
        let discovered = DiscoverResult::from_json(&text, self.config.source_type)
            .with_context(|| format!("Invalid discover result {}", discover_result.display()))?;

        let columns = discovered
            .list_columns(&self.config.source_schema_name, &self.config.source_table_name)
            .context("Failed to read source columns from discover result")?;
        let ddl = self
            .generator
            .generate(
                &columns,
                &self.config.source_schema_name,
                &self.config.source_table_name,
            )
            .with_context(|| format!("Failed to generate DDL for {}", self.target))?;

        if discover_result != self.paths.discover_result {
            write_output(&self.paths.discover_result, &text)?;
        }
        write_output(&self.paths.create_target_table, &ddl)?;
        Ok(self.paths.create_target_table.clone())
    }

    /// Generate the query returning the existing table's DDL.
    pub fn fetch_ddl(&self) -> anyhow::Result<PathBuf> {
        let source = self.source_table();
        let sql = fetch_table_ddl_sql(&source.project_id, &source.dataset, &source.table);
        write_output(&self.paths.fetch_source_table_ddl, &sql)?;
        Ok(self.paths.fetch_source_table_ddl.clone())
    }

    /// Generate the copy statement from the existing table's DDL and the
    /// previously generated target DDL.
    ///
    /// Nothing is written unless the statement is generated.
    pub fn copy_rows(&self, source_ddl: &Path) -> anyhow::Result<PathBuf> {
        let source = read_input(source_ddl)?;
        let destination = read_input(&self.paths.create_target_table)
            .context("Target table DDL missing, run create-table first")?;

        let sql = generate_copy_rows_sql_from_ddl(&source, &destination).with_context(|| {
            format!(
                "Failed to generate copy rows SQL from {} to {}",
                self.source_table(),
                self.target
            )
        })?;

        if source_ddl != self.paths.source_table_ddl {
            write_output(&self.paths.source_table_ddl, &source)?;
        }
        write_output(&self.paths.copy_rows, &sql)?;
        Ok(self.paths.copy_rows.clone())
    }

    /// Run every generation step.
    pub fn dry_run(&self, discover_result: &Path, source_ddl: &Path) -> anyhow::Result<DryRunSummary> {
        let summary = DryRunSummary {
            create_target_table: self.create_table(discover_result)?,
            fetch_source_table_ddl: self.fetch_ddl()?,
            copy_rows: self.copy_rows(source_ddl)?,
        };
        tracing::info!(
            "Dry run finished successfully.\nGenerated `CREATE TABLE` DDL at '{}'.\nGenerated copy rows SQL at '{}'.",
            summary.create_target_table.display(),
            summary.copy_rows.display()
        );
        Ok(summary)
    }
}

/// Generate a copy statement from two DDL files, without a migration config.
pub fn copy_rows_between(
    source_ddl: &Path,
    destination_ddl: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let source = read_input(source_ddl)?;
    let destination = read_input(destination_ddl)?;
    let sql = generate_copy_rows_sql_from_ddl(&source, &destination)?;
    write_output(output, &sql)
}
