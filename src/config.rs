//! Migration configuration.
//!
//! A migration is described by a YAML file holding what the toolkit would
//! otherwise read from the Datastream stream: the source kind, the BigQuery
//! destination layout and the freshness setting.
//!
//! ```yaml
//! project_id: my-project
//! source_type: mysql
//! connection_profile_name: mysql-profile
//! max_staleness_seconds: 15m
//! destination:
//!   source_hierarchy_datasets:
//!     location: US
//!     dataset_id_prefix: datastream_
//! source_schema_name: shop
//! source_table_name: orders
//! bigquery_source_dataset_name: dataflow_replica
//! bigquery_source_table_name: shop_orders
//! ```

pub mod duration;

use bq_ddl::{DatasetNaming, SourceKind};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Error Types
// ============================================================================

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A required setting is empty
    #[error("Config field '{0}' must not be empty")]
    EmptyField(&'static str),
}

// ============================================================================
// Config
// ============================================================================

/// BigQuery destination layout of the Datastream stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// All tables are written into one dataset.
    SingleTargetDataset { dataset_id: String },

    /// One dataset per source schema.
    SourceHierarchyDatasets {
        location: String,
        #[serde(default)]
        dataset_id_prefix: String,
        #[serde(default)]
        kms_key_name: Option<String>,
    },
}

impl Destination {
    /// Dataset naming strategy of this layout.
    pub fn naming(&self) -> DatasetNaming {
        match self {
            Self::SingleTargetDataset { dataset_id } => DatasetNaming::Single {
                dataset: dataset_id.clone(),
            },
            Self::SourceHierarchyDatasets {
                location,
                dataset_id_prefix,
                kms_key_name,
            } => DatasetNaming::Dynamic {
                dataset_id_prefix: dataset_id_prefix.clone(),
                location: location.clone(),
                kms_key_name: kms_key_name.clone().filter(|key| !key.is_empty()),
            },
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Settings of one table migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Google Cloud project holding both BigQuery tables
    pub project_id: String,

    /// Source database kind
    pub source_type: SourceKind,

    /// Datastream connection profile, used to name the saved discover result
    #[serde(default)]
    pub connection_profile_name: Option<String>,

    /// `max_staleness` of the created table; seconds or a duration like `15m`
    #[serde(deserialize_with = "duration::deserialize_seconds")]
    pub max_staleness_seconds: u64,

    /// BigQuery destination layout, a one-key map naming the variant
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub destination: Destination,

    /// Source schema (MySQL database or Oracle schema) of the table
    pub source_schema_name: String,

    /// Source table name
    pub source_table_name: String,

    /// Dataset of the existing BigQuery table the rows are copied from
    pub bigquery_source_dataset_name: String,

    /// Existing BigQuery table the rows are copied from
    pub bigquery_source_table_name: String,

    /// Root of generated files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl MigrationConfig {
    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reject empty names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("project_id", &self.project_id),
            ("source_schema_name", &self.source_schema_name),
            ("source_table_name", &self.source_table_name),
            (
                "bigquery_source_dataset_name",
                &self.bigquery_source_dataset_name,
            ),
            ("bigquery_source_table_name", &self.bigquery_source_table_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }

        match &self.destination {
            Destination::SingleTargetDataset { dataset_id } if dataset_id.trim().is_empty() => {
                Err(ConfigError::EmptyField("destination.single_target_dataset.dataset_id"))
            }
            Destination::SourceHierarchyDatasets { location, .. } if location.trim().is_empty() => {
                Err(ConfigError::EmptyField("destination.source_hierarchy_datasets.location"))
            }
            _ => Ok(()),
        }
    }
}

/// Command-line overrides of config file values.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Google Cloud project ID
    #[arg(long, env = "BQ_MIGRATE_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Table max_staleness, e.g. "900", "15m", "1h"
    #[arg(long, value_parser = duration::parse_duration_to_secs)]
    pub max_staleness: Option<u64>,

    /// Directory generated files are written to
    #[arg(long, env = "BQ_MIGRATE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Replace config values with the ones given on the command line.
    pub fn apply(&self, config: &mut MigrationConfig) {
        if let Some(project_id) = &self.project_id {
            config.project_id = project_id.clone();
        }
        if let Some(max_staleness) = self.max_staleness {
            config.max_staleness_seconds = max_staleness;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
    }
}
