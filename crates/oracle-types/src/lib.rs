//! Oracle type conversions for bq-core types.
//!
//! This crate maps Oracle column types, as reported in a Datastream discovery
//! document, to BigQuery column types.
//!
//! # Example
//!
//! ```rust
//! use bq_core::{BigQueryType, ColumnConverter, SourceColumn};
//! use oracle_types::OracleColumnConverter;
//!
//! let converter = OracleColumnConverter;
//! let column = SourceColumn::new("id", "NUMBER").with_precision(10, Some(0));
//! assert_eq!(converter.convert(&column), BigQueryType::Int64);
//! ```

pub mod schema;

pub use schema::{oracle_column_to_bigquery_type, oracle_type_to_bigquery_type, OracleColumnConverter};
