//! Discovery document navigation.
//!
//! A Datastream `discover` call returns a nested document describing the
//! schemas, tables and columns of a source database. This crate locates the
//! column list of one table inside that document and turns it into
//! [`SourceColumn`](bq_core::SourceColumn) values.
//!
//! ```rust
//! use bq_core::SourceKind;
//! use discover::DiscoverResult;
//!
//! let document = serde_json::json!({
//!     "mysqlRdbms": {"mysqlDatabases": [{
//!         "database": "shop",
//!         "mysqlTables": [{"table": "orders", "mysqlColumns": [
//!             {"column": "id", "dataType": "INT", "primaryKey": true}
//!         ]}]
//!     }]}
//! });
//!
//! let result = DiscoverResult::from_value(&document, SourceKind::MySql).unwrap();
//! let columns = result.list_columns("shop", "orders").unwrap();
//! assert_eq!(columns[0].name, "id");
//! ```

pub mod error;
pub mod keys;
pub mod navigator;

pub use error::{DiscoverError, Result};
pub use keys::DiscoverKeys;
pub use navigator::{list_columns, DiscoverResult};
