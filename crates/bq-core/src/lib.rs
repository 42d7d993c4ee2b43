//! Core types for the bq-migrate toolkit.
//!
//! This crate provides the foundational types shared by every other crate in
//! the workspace:
//!
//! - [`BigQueryType`] - Closed set of BigQuery column types
//! - [`resolve_decimal`] - Precision/scale resolution for exact numerics
//! - [`SourceColumn`] - Column descriptor read from a discovery document
//! - [`TableSchema`] - Ordered BigQuery table schema
//! - [`ColumnConverter`] - Interface implemented per source database
//!
//! # Architecture
//!
//! ```text
//! bq-core (this crate)
//!    │
//!    ├─── mysql-types    (ColumnConverter for MySQL)
//!    ├─── oracle-types   (ColumnConverter for Oracle)
//!    ├─── discover       (reads discovery documents into SourceColumn)
//!    └─── bq-ddl         (CREATE TABLE generation, DDL parsing, row copy)
//! ```
//!
//! # Example
//!
//! ```rust
//! use bq_core::{resolve_decimal, BigQueryType, TableSchema};
//!
//! let schema = TableSchema::new("project.dataset.orders")
//!     .with_column("id", BigQueryType::Int64)
//!     .unwrap()
//!     .with_column("total", resolve_decimal(12, 2))
//!     .unwrap();
//!
//! assert_eq!(schema.get_column_type("total"), Some(&BigQueryType::numeric(12, 2)));
//! ```

pub mod convert;
pub mod decimal;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use convert::ColumnConverter;
pub use decimal::{
    resolve_decimal, BIGNUMERIC_MAX_PRECISION, BIGNUMERIC_MAX_SCALE,
    BIGNUMERIC_PRECISION_TO_SCALE_MAX_DIFF, INT64_MAX_PRECISION, NUMERIC_MAX_SCALE,
    NUMERIC_PRECISION_TO_SCALE_MAX_DIFF,
};
pub use schema::{
    sanitize_column_name, ColumnDefinition, SchemaError, SourceColumn, SourceKind, TableSchema,
    MAX_CLUSTERING_KEYS,
};
pub use types::{BigQueryType, DecimalParams, TypeKind, UnknownTypeError};
