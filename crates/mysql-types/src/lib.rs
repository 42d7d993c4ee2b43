//! MySQL type conversions for bq-core types.
//!
//! This crate maps MySQL column types, as reported in a Datastream discovery
//! document, to BigQuery column types.
//!
//! # Structure
//!
//! - `schema`: MySQL column descriptor → `BigQueryType` conversion
//!
//! # Example
//!
//! ```rust
//! use bq_core::{BigQueryType, ColumnConverter, SourceColumn};
//! use mysql_types::MySqlColumnConverter;
//!
//! let converter = MySqlColumnConverter;
//! let column = SourceColumn::new("total", "decimal").with_precision(10, Some(2));
//! assert_eq!(converter.convert(&column), BigQueryType::numeric(10, 2));
//! ```

pub mod schema;

pub use schema::{mysql_column_to_bigquery_type, mysql_type_to_bigquery_type, MySqlColumnConverter};
