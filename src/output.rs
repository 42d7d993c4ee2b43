//! Layout of generated files under the output directory.

use crate::config::MigrationConfig;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub const DISCOVER_RESULT_DIR: &str = "discover_result";
pub const SOURCE_TABLE_DDL_DIR: &str = "source_table_ddl";
pub const CREATE_TARGET_TABLE_DIR: &str = "create_target_table";
pub const FETCH_SOURCE_TABLE_DDL_DIR: &str = "fetch_source_bigquery_table_ddl";
pub const COPY_ROWS_DIR: &str = "copy_rows";

/// Short name of a connection profile given as a full resource name.
///
/// `projects/p/locations/l/connectionProfiles/mysql-cp` becomes `mysql-cp`.
pub fn connection_profile_short_name(name: &str) -> &str {
    name.rsplit_once("/connectionProfiles/")
        .map_or(name, |(_, short)| short)
}

/// Paths of every file one table migration produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Saved discover result, `{profile}_{schema}_{table}.json`
    pub discover_result: PathBuf,
    /// DDL of the existing (Dataflow) BigQuery table
    pub source_table_ddl: PathBuf,
    /// Generated `CREATE TABLE` for the new table
    pub create_target_table: PathBuf,
    /// Query fetching the existing table's DDL
    pub fetch_source_table_ddl: PathBuf,
    /// Generated `INSERT ... SELECT`
    pub copy_rows: PathBuf,
}

impl OutputPaths {
    /// Paths for `config`, with the target table `target_table` (`project.dataset.table`).
    pub fn new(config: &MigrationConfig, target_table: &str) -> Self {
        let root = config.output_dir.as_path();
        let source_table = format!(
            "{}.{}.{}",
            config.project_id, config.bigquery_source_dataset_name, config.bigquery_source_table_name
        );
        let profile = config
            .connection_profile_name
            .as_deref()
            .map(connection_profile_short_name)
            .unwrap_or("discover");

        Self {
            discover_result: root.join(DISCOVER_RESULT_DIR).join(format!(
                "{profile}_{}_{}.json",
                config.source_schema_name, config.source_table_name
            )),
            source_table_ddl: root
                .join(SOURCE_TABLE_DDL_DIR)
                .join(format!("{source_table}.sql")),
            create_target_table: root
                .join(CREATE_TARGET_TABLE_DIR)
                .join(format!("{target_table}.sql")),
            fetch_source_table_ddl: root
                .join(FETCH_SOURCE_TABLE_DDL_DIR)
                .join(format!("{source_table}.sql")),
            copy_rows: root
                .join(COPY_ROWS_DIR)
                .join(format!("{source_table}__to__{target_table}.sql")),
        }
    }
}

/// Write `data` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, data: &str) -> anyhow::Result<()> {
    tracing::info!("Writing to file: '{}'", path.display());
    tracing::debug!("Data: {data}");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

/// Read a previously generated or user-provided file.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
