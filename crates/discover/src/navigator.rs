//! Schema, table and column lookup inside a discovery document.

use crate::error::{DiscoverError, Result};
use crate::keys::DiscoverKeys;
use bq_core::{SourceColumn, SourceKind};
use serde_json::Value;
use std::path::Path;

/// The schema list of a discovery document, read for one source kind.
#[derive(Debug, Clone)]
pub struct DiscoverResult {
    kind: SourceKind,
    schemas: Vec<Value>,
}

impl DiscoverResult {
    /// Descend into `<rdbms>.<schema_list>` of an already parsed document.
    pub fn from_value(document: &Value, kind: SourceKind) -> Result<Self> {
        let keys = DiscoverKeys::for_kind(kind);
        let rdbms = document.get(keys.rdbms).ok_or_else(|| {
            DiscoverError::InvalidDocument(format!(
                "missing '{}' key for a {kind} source",
                keys.rdbms
            ))
        })?;
        let schemas = rdbms
            .get(keys.schema_list)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                DiscoverError::InvalidDocument(format!(
                    "'{}.{}' is missing or not a list",
                    keys.rdbms, keys.schema_list
                ))
            })?;

        Ok(Self {
            kind,
            schemas: schemas.clone(),
        })
    }

    /// Parse a discovery document from JSON text.
    pub fn from_json(text: &str, kind: SourceKind) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(&document, kind)
    }

    /// Load a discovery document previously saved to disk.
    pub fn from_file<P: AsRef<Path>>(path: P, kind: SourceKind) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading discover result from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text, kind)
    }

    /// Source kind this document was read as.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    fn keys(&self) -> &'static DiscoverKeys {
        DiscoverKeys::for_kind(self.kind)
    }

    /// Names of every schema in the document, in document order.
    pub fn list_schemas(&self) -> Vec<String> {
        let key = self.keys().schema_name;
        self.schemas
            .iter()
            .filter_map(|schema| schema.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    /// Names of every table in `schema`.
    pub fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        let tables = self.get_schema(schema)?;
        Ok(self.table_names(tables))
    }

    /// Column descriptors of `schema.table`, in document order.
    pub fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<SourceColumn>> {
        tracing::debug!("Extracting table '{table}' in database '{schema}' from discover result");

        let keys = self.keys();
        let tables = self.get_schema(schema)?;
        let columns = tables
            .iter()
            .find(|t| t.get(keys.table_name).and_then(Value::as_str) == Some(table))
            .and_then(|t| t.get(keys.column_list))
            .and_then(Value::as_array)
            .filter(|columns| !columns.is_empty())
            .ok_or_else(|| DiscoverError::TableNotFound {
                schema: schema.to_string(),
                table: table.to_string(),
                available: self.table_names(tables),
            })?;

        columns
            .iter()
            .map(|column| serde_json::from_value(column.clone()).map_err(DiscoverError::from))
            .collect()
    }

    /// Table list of a schema; absent and empty lists are both "not found".
    fn get_schema(&self, schema: &str) -> Result<&Vec<Value>> {
        let keys = self.keys();
        self.schemas
            .iter()
            .find(|s| s.get(keys.schema_name).and_then(Value::as_str) == Some(schema))
            .and_then(|s| s.get(keys.table_list))
            .and_then(Value::as_array)
            .filter(|tables| !tables.is_empty())
            .ok_or_else(|| DiscoverError::SchemaNotFound {
                schema: schema.to_string(),
                available: self.list_schemas(),
            })
    }

    fn table_names(&self, tables: &[Value]) -> Vec<String> {
        let key = self.keys().table_name;
        tables
            .iter()
            .filter_map(|table| table.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

/// Column descriptors of `schema.table` in a parsed discovery document.
pub fn list_columns(
    document: &Value,
    kind: SourceKind,
    schema: &str,
    table: &str,
) -> Result<Vec<SourceColumn>> {
    DiscoverResult::from_value(document, kind)?.list_columns(schema, table)
}
