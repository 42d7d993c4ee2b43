//! Schema definitions for the bq-migrate toolkit.
//!
//! ## Type Hierarchy
//!
//! **Source side** (as read from a discovery document):
//! - `SourceKind` - Which source database produced the document
//! - `SourceColumn` - Single source column descriptor
//!
//! **Target side** (BigQuery):
//! - `ColumnDefinition` - Single column with its BigQuery type
//! - `TableSchema` - Fully qualified table with ordered columns and primary keys

use crate::types::BigQueryType;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Two columns share a name
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// Column not found in table schema
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },
}

// ============================================================================
// Source Side
// ============================================================================

/// Source database kind.
///
/// Each kind has its own type table and its own discovery-document
/// vocabulary; the two are never aliases of one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// MySQL source
    #[serde(alias = "MYSQL")]
    MySql,
    /// Oracle source
    #[serde(alias = "ORACLE")]
    Oracle,
}

impl SourceKind {
    /// Whether tables of this kind may lack a primary key, in which case the
    /// generated table gets a synthetic `ROWID` key.
    pub fn has_optional_primary_keys(self) -> bool {
        matches!(self, Self::Oracle)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => f.write_str("mysql"),
            Self::Oracle => f.write_str("oracle"),
        }
    }
}

/// One column of a source table, as described by the discovery document.
///
/// Field names follow the document's camelCase keys
/// (`column`, `dataType`, `precision`, `scale`, `primaryKey`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceColumn {
    /// Column name
    #[serde(rename = "column")]
    pub name: String,

    /// Source type name, compared case-insensitively
    pub data_type: String,

    /// Numeric precision
    #[serde(default)]
    pub precision: Option<i64>,

    /// Numeric scale
    #[serde(default)]
    pub scale: Option<i64>,

    /// Whether the column is part of the primary key
    #[serde(default)]
    pub primary_key: bool,

    /// 1-based position reported by the source, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal_position: Option<i64>,
}

impl SourceColumn {
    /// Create a column descriptor without numeric parameters.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            precision: None,
            scale: None,
            primary_key: false,
            ordinal_position: None,
        }
    }

    /// Set precision and scale.
    pub fn with_precision(mut self, precision: i64, scale: Option<i64>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    /// Mark the column as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Uppercased type name used for table lookups.
    pub fn upper_data_type(&self) -> String {
        self.data_type.trim().to_uppercase()
    }

    /// Scale, defaulting to 0 when absent.
    pub fn effective_scale(&self) -> i64 {
        self.scale.unwrap_or(0)
    }
}

// ============================================================================
// Target Side
// ============================================================================

/// Column definition of a BigQuery table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: BigQueryType,
}

impl ColumnDefinition {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, column_type: BigQueryType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Number of leading primary-key columns BigQuery accepts as clustering keys.
pub const MAX_CLUSTERING_KEYS: usize = 4;

/// BigQuery table schema.
///
/// Columns keep insertion order: discovery order when generated, DDL order
/// when parsed back. Column names are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Fully qualified table name without backticks, e.g. `project.dataset.table`
    pub table_name: String,

    /// Column definitions in order
    pub columns: Vec<ColumnDefinition>,

    /// Primary key column names in key order
    #[serde(default)]
    pub primary_keys: Vec<String>,
}

impl TableSchema {
    /// Create an empty schema for the given table.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
            primary_keys: Vec::new(),
        }
    }

    /// Append a column, rejecting duplicate names.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column_type: BigQueryType,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if self.get_column(&name).is_some() {
            return Err(SchemaError::DuplicateColumn {
                table: self.table_name.clone(),
                column: name,
            });
        }
        self.columns.push(ColumnDefinition::new(name, column_type));
        Ok(())
    }

    /// Builder-style variant of [`TableSchema::push_column`].
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column_type: BigQueryType,
    ) -> Result<Self, SchemaError> {
        self.push_column(name, column_type)?;
        Ok(self)
    }

    /// Add a primary key reference; the column must already exist.
    pub fn push_primary_key(&mut self, name: impl Into<String>) -> Result<(), SchemaError> {
        let name = name.into();
        if self.get_column(&name).is_none() {
            return Err(SchemaError::ColumnNotFound {
                table: self.table_name.clone(),
                column: name,
            });
        }
        self.primary_keys.push(name);
        Ok(())
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the type of a column by name.
    pub fn get_column_type(&self, name: &str) -> Option<&BigQueryType> {
        self.get_column(name).map(|c| &c.column_type)
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Clustering keys: the first four primary keys, in key order.
    pub fn clustering_keys(&self) -> &[String] {
        let len = self.primary_keys.len().min(MAX_CLUSTERING_KEYS);
        &self.primary_keys[..len]
    }
}

impl fmt::Display for TableSchema {
    /// Renders `table {col: TYPE, ...}`, used in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.table_name)?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", column.name, column.column_type)?;
        }
        f.write_str("}")
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Make a source column name safe for BigQuery.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, and a leading digit
/// gets a `_` prefix. Applying it twice gives the same result.
///
/// ```
/// use bq_core::sanitize_column_name;
///
/// assert_eq!(sanitize_column_name("1col"), "_1col");
/// assert_eq!(sanitize_column_name("a.b$c"), "a_b_c");
/// ```
pub fn sanitize_column_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{cleaned}")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_column_name() {
        assert_eq!(sanitize_column_name("1col"), "_1col");
        assert_eq!(sanitize_column_name("a.b$c"), "a_b_c");
        assert_eq!(sanitize_column_name("plain_name"), "plain_name");
        assert_eq!(sanitize_column_name("größe"), "gr__e");
        assert_eq!(sanitize_column_name("with space"), "with_space");
        assert_eq!(sanitize_column_name(""), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["1col", "a.b$c", "_1", "9-lives", "ok", "#"] {
            let once = sanitize_column_name(name);
            assert_eq!(sanitize_column_name(&once), once);
        }
    }

    #[test]
    fn test_source_column_from_discover_json() {
        let column: SourceColumn = serde_json::from_str(
            r#"{"column": "price", "dataType": "decimal", "precision": 10, "scale": 2,
                "primaryKey": true, "ordinalPosition": 3, "nullable": true}"#,
        )
        .unwrap();

        assert_eq!(column.name, "price");
        assert_eq!(column.upper_data_type(), "DECIMAL");
        assert_eq!(column.precision, Some(10));
        assert_eq!(column.effective_scale(), 2);
        assert!(column.primary_key);
    }

    #[test]
    fn test_source_column_defaults() {
        let column: SourceColumn =
            serde_json::from_str(r#"{"column": "n", "dataType": "NUMBER", "precision": 5}"#)
                .unwrap();
        assert_eq!(column.scale, None);
        assert_eq!(column.effective_scale(), 0);
        assert!(!column.primary_key);
    }

    #[test]
    fn test_source_kind_serde() {
        let kind: SourceKind = serde_yaml::from_str("mysql").unwrap();
        assert_eq!(kind, SourceKind::MySql);
        let kind: SourceKind = serde_yaml::from_str("ORACLE").unwrap();
        assert_eq!(kind, SourceKind::Oracle);
        assert!(SourceKind::Oracle.has_optional_primary_keys());
        assert!(!SourceKind::MySql.has_optional_primary_keys());
    }

    #[test]
    fn test_table_schema_rejects_duplicates() {
        let mut schema = TableSchema::new("p.d.t");
        schema.push_column("id", BigQueryType::Int64).unwrap();
        let err = schema.push_column("id", BigQueryType::String).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateColumn {
                table: "p.d.t".to_string(),
                column: "id".to_string()
            }
        );
    }

    #[test]
    fn test_primary_key_must_exist() {
        let mut schema = TableSchema::new("p.d.t")
            .with_column("id", BigQueryType::Int64)
            .unwrap();
        assert!(schema.push_primary_key("id").is_ok());
        assert!(matches!(
            schema.push_primary_key("missing"),
            Err(SchemaError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_clustering_keys_truncate_to_four() {
        let mut schema = TableSchema::new("p.d.t");
        for name in ["a", "b", "c", "d", "e", "f"] {
            schema.push_column(name, BigQueryType::Int64).unwrap();
            schema.push_primary_key(name).unwrap();
        }
        assert_eq!(schema.clustering_keys(), ["a", "b", "c", "d"]);

        schema.primary_keys.truncate(2);
        assert_eq!(schema.clustering_keys(), ["a", "b"]);
    }

    #[test]
    fn test_display_lists_columns() {
        let schema = TableSchema::new("p.d.t")
            .with_column("id", BigQueryType::Int64)
            .unwrap()
            .with_column("amount", BigQueryType::numeric(10, 2))
            .unwrap();
        assert_eq!(
            schema.to_string(),
            "p.d.t {id: INT64, amount: NUMERIC(10, 2)}"
        );
    }
}
