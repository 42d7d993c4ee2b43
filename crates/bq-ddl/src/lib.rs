//! BigQuery DDL for bq-migrate.
//!
//! - [`generate_create_table_ddl`] turns discovered source columns into a
//!   `CREATE TABLE` statement (optionally preceded by `CREATE SCHEMA`).
//! - [`parse_create_table`] reads such a statement, or the DDL BigQuery
//!   reports for an existing table, back into a [`TableSchema`].
//! - [`generate_copy_rows_sql`] reconciles two table schemas into one
//!   `INSERT ... SELECT` statement, casting where their types differ.
//!
//! # Example
//!
//! ```rust
//! use bq_core::{SourceColumn, SourceKind};
//! use bq_ddl::{generate_create_table_ddl, parse_create_table, TableTarget};
//!
//! let columns = vec![
//!     SourceColumn::new("id", "INT").primary_key(),
//!     SourceColumn::new("name", "VARCHAR"),
//! ];
//! let target = TableTarget::new("proj", "ds", "users");
//!
//! let ddl = generate_create_table_ddl(&columns, SourceKind::MySql, &target, 900, None).unwrap();
//! let schema = parse_create_table(&ddl).unwrap();
//! assert_eq!(schema.column_names(), ["id", "name"]);
//! ```

pub mod copy_rows;
pub mod create_table;
pub mod error;
pub mod fetch;
pub mod naming;
pub mod parser;

pub use copy_rows::{
    find_cast_rule, generate_copy_rows_sql, generate_copy_rows_sql_from_ddl,
    is_replication_metadata_column, CastRule, CAST_RULES,
};
pub use create_table::{
    build_table_schema, generate_create_table_ddl, render_create_dataset, render_create_table,
    CreateTableGenerator, ROWID_COLUMN,
};
pub use error::{CopyRowsError, DdlError, DdlParseError, MissingFrom};
pub use fetch::fetch_table_ddl_sql;
pub use naming::{
    clean_dataset_name, clean_table_name, dynamic_datasets_dataset_name,
    dynamic_datasets_table_name, single_dataset_table_name, DatasetNaming, DatasetOptions,
    TableTarget,
};
pub use parser::parse_create_table;

// Re-exported so callers need only this crate for the common types.
pub use bq_core::{BigQueryType, SourceColumn, SourceKind, TableSchema};

use bq_core::ColumnConverter;
use mysql_types::MySqlColumnConverter;
use oracle_types::OracleColumnConverter;

/// Column converter for a source kind.
pub fn converter_for(kind: SourceKind) -> Box<dyn ColumnConverter> {
    match kind {
        SourceKind::MySql => Box::new(MySqlColumnConverter),
        SourceKind::Oracle => Box::new(OracleColumnConverter),
    }
}
