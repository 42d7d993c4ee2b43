//! bq-migrate
//!
//! Offline tooling for moving a table replicated by Dataflow's "Datastream to
//! BigQuery" template onto Datastream's native BigQuery destination.
//!
//! For one source table the migration produces, under the output directory:
//!
//! - `create_target_table/`: the `CREATE TABLE` DDL of the new table, derived
//!   from a saved Datastream discover result
//! - `fetch_source_bigquery_table_ddl/`: a query returning the DDL of the
//!   existing Dataflow table
//! - `copy_rows/`: an `INSERT ... SELECT` copying every row into the new
//!   table, with casts where the two tables disagree on a column type
//!
//! The type mapping, DDL rendering and parsing live in the `bq-ddl` crate;
//! reading discover results lives in `discover`.
//!
//! # CLI Usage
//!
//! ```bash
//! bq-migrate dry-run --config migration.yaml \
//!   --discover-result discover.json \
//!   --source-ddl dataflow_table.sql
//! ```

pub mod config;
pub mod migrate;
pub mod output;

pub use config::{ConfigError, ConfigOverrides, Destination, MigrationConfig};
pub use migrate::{copy_rows_between, DryRunSummary, MigrationPlan};
pub use output::{write_output, OutputPaths};
