//! Error types for the bq-ddl crate.

use bq_core::{BigQueryType, SchemaError};
use std::fmt;
use thiserror::Error;

/// Errors raised while building a table definition from source columns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DdlError {
    /// Two source columns sanitise to the same BigQuery name
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors raised while parsing `CREATE TABLE` text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DdlParseError {
    #[error("No CREATE TABLE statement found in DDL")]
    MissingCreateTable,

    #[error("CREATE TABLE `{table}` has no column list")]
    MissingColumnList { table: String },

    #[error("CREATE TABLE `{table}` has an empty column list")]
    EmptyColumnList { table: String },

    #[error("Unsupported type '{type_name}' for column `{column}`")]
    UnsupportedType { column: String, type_name: String },

    #[error("Duplicate column `{column}` in table `{table}`")]
    DuplicateColumn { table: String, column: String },

    #[error("Primary key column `{column}` is not a column of table `{table}`")]
    UnknownPrimaryKey { table: String, column: String },

    #[error("Invalid DDL: {0}")]
    Syntax(String),
}

/// Which table of a reconciliation lacks a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFrom {
    Source,
    Destination,
}

impl fmt::Display for MissingFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors raised while reconciling two table schemas into a copy statement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopyRowsError {
    #[error(
        "Column names must match in source and destination, but could not find column `{column}` in the {missing_from} table. The {missing_from} schema is {schema}"
    )]
    SchemaMismatch {
        column: String,
        missing_from: MissingFrom,
        schema: String,
    },

    #[error("No cast from {source_type} to {destination_type} for column `{column}`")]
    UnsupportedConversion {
        column: String,
        source_type: BigQueryType,
        destination_type: BigQueryType,
    },

    #[error("Failed to parse DDL: {0}")]
    Parse(#[from] DdlParseError),
}
