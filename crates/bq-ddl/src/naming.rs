//! Target dataset and table naming.
//!
//! Datastream writes a source table either into one fixed dataset
//! (`single_target_dataset`) or into one dataset per source schema
//! (`source_hierarchy_datasets`). Table and dataset names follow the same
//! cleaning rules Datastream applies.

use std::fmt;

const TABLE_NAME_REPLACED: &[char] = &['/', '$', '.', '@', '+'];

/// Replace each of `/ $ . @ +` with `_`.
pub fn clean_table_name(name: &str) -> String {
    name.replace(TABLE_NAME_REPLACED, "_")
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn clean_dataset_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Table name inside a single target dataset: `{schema}_{table}`.
pub fn single_dataset_table_name(schema: &str, table: &str) -> String {
    clean_table_name(&format!("{schema}_{table}"))
}

/// Table name inside a per-schema dataset.
pub fn dynamic_datasets_table_name(table: &str) -> String {
    clean_table_name(table)
}

/// Per-schema dataset name: `{prefix}{schema}`.
pub fn dynamic_datasets_dataset_name(dataset_id_prefix: &str, schema: &str) -> String {
    clean_dataset_name(&format!("{dataset_id_prefix}{schema}"))
}

/// Options of a `CREATE SCHEMA` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOptions {
    /// BigQuery location, e.g. `US` or `europe-west1`
    pub location: String,
    /// Customer-managed encryption key
    pub kms_key_name: Option<String>,
}

impl DatasetOptions {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kms_key_name: None,
        }
    }

    pub fn with_kms_key_name(mut self, kms_key_name: impl Into<String>) -> Self {
        self.kms_key_name = Some(kms_key_name.into());
        self
    }
}

/// How the destination dataset of a source table is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetNaming {
    /// Every table goes to one existing dataset.
    Single { dataset: String },
    /// One dataset per source schema, created on demand.
    Dynamic {
        dataset_id_prefix: String,
        location: String,
        kms_key_name: Option<String>,
    },
}

impl DatasetNaming {
    /// Resolve the BigQuery table for `schema.table` of the source.
    pub fn resolve(&self, project_id: &str, schema: &str, table: &str) -> TableTarget {
        match self {
            Self::Single { dataset } => TableTarget::new(
                project_id,
                dataset.clone(),
                single_dataset_table_name(schema, table),
            ),
            Self::Dynamic {
                dataset_id_prefix, ..
            } => TableTarget::new(
                project_id,
                dynamic_datasets_dataset_name(dataset_id_prefix, schema),
                dynamic_datasets_table_name(table),
            ),
        }
    }

    /// Options for the `CREATE SCHEMA` statement, if this naming creates datasets.
    pub fn dataset_options(&self) -> Option<DatasetOptions> {
        match self {
            Self::Single { .. } => None,
            Self::Dynamic {
                location,
                kms_key_name,
                ..
            } => Some(DatasetOptions {
                location: location.clone(),
                kms_key_name: kms_key_name.clone(),
            }),
        }
    }
}

/// A fully resolved BigQuery table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTarget {
    pub project_id: String,
    pub dataset: String,
    pub table: String,
}

impl TableTarget {
    pub fn new(
        project_id: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// `project.dataset.table`
    pub fn fully_qualified(&self) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset, self.table)
    }

    /// `project.dataset`
    pub fn fully_qualified_dataset(&self) -> String {
        format!("{}.{}", self.project_id, self.dataset)
    }
}

impl fmt::Display for TableTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_table_name() {
        assert_eq!(clean_table_name("a/b$c.d@e+f"), "a_b_c_d_e_f");
        assert_eq!(clean_table_name("with-dash and space"), "with-dash and space");
    }

    #[test]
    fn test_clean_dataset_name() {
        assert_eq!(clean_dataset_name("my-db.v2"), "my_db_v2");
        assert_eq!(clean_dataset_name("ok_123"), "ok_123");
    }

    #[test]
    fn test_single_dataset_naming() {
        let naming = DatasetNaming::Single {
            dataset: "replica".to_string(),
        };
        let target = naming.resolve("proj", "shop", "order.items");
        assert_eq!(target.fully_qualified(), "proj.replica.shop_order_items");
        assert_eq!(naming.dataset_options(), None);
    }

    #[test]
    fn test_dynamic_datasets_naming() {
        let naming = DatasetNaming::Dynamic {
            dataset_id_prefix: "ds-".to_string(),
            location: "US".to_string(),
            kms_key_name: None,
        };
        let target = naming.resolve("proj", "shop", "orders");
        assert_eq!(target.dataset, "ds_shop");
        assert_eq!(target.table, "orders");
        assert_eq!(target.to_string(), "proj.ds_shop.orders");
        assert_eq!(target.fully_qualified_dataset(), "proj.ds_shop");
        assert_eq!(naming.dataset_options(), Some(DatasetOptions::new("US")));
    }
}
