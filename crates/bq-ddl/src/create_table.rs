//! `CREATE TABLE` generation from discovered source columns.

use crate::converter_for;
use crate::error::DdlError;
use crate::naming::{DatasetNaming, DatasetOptions, TableTarget};
use bq_core::{sanitize_column_name, BigQueryType, SourceColumn, SourceKind, TableSchema};

/// Name of the synthetic key column added to Oracle tables without a primary key.
pub const ROWID_COLUMN: &str = "ROWID";

/// Convert source columns into a BigQuery table schema.
///
/// Column names are sanitised and converted with the converter of `kind`.
/// Primary keys keep source order. An Oracle table without primary keys gets
/// a trailing `ROWID STRING` column as its only key.
pub fn build_table_schema(
    columns: &[SourceColumn],
    kind: SourceKind,
    table_name: &str,
) -> Result<TableSchema, DdlError> {
    let converter = converter_for(kind);
    let mut schema = TableSchema::new(table_name);

    for column in columns {
        let name = sanitize_column_name(&column.name);
        schema.push_column(name.clone(), converter.convert(column))?;
        if column.primary_key {
            schema.push_primary_key(name)?;
        }
    }

    if schema.primary_keys.is_empty() && kind.has_optional_primary_keys() {
        tracing::debug!("No primary key found for {table_name}, adding {ROWID_COLUMN}");
        schema.push_column(ROWID_COLUMN, BigQueryType::String)?;
        schema.push_primary_key(ROWID_COLUMN)?;
    }

    Ok(schema)
}

fn backticked(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a `CREATE TABLE` statement with a `max_staleness` option.
///
/// Tables with primary keys get an unenforced `PRIMARY KEY` constraint and are
/// clustered by their first four keys.
pub fn render_create_table(schema: &TableSchema, max_staleness_seconds: u64) -> String {
    let columns = schema
        .columns
        .iter()
        .map(|column| format!("`{}` {}", column.name, column.column_type))
        .collect::<Vec<_>>()
        .join(",\n  ");

    if schema.primary_keys.is_empty() {
        format!(
            "CREATE TABLE `{}` \n(\n  {}\n)\n OPTIONS(\n  max_staleness=MAKE_INTERVAL(0, 0, 0, 0, 0, {})\n);",
            schema.table_name, columns, max_staleness_seconds
        )
    } else {
        format!(
            "CREATE TABLE `{}` \n(\n  {},\n  PRIMARY KEY({}) NOT ENFORCED\n)\nCLUSTER BY {}\nOPTIONS(\n  max_staleness=MAKE_INTERVAL(0, 0, 0, 0, 0, {})\n);",
            schema.table_name,
            columns,
            backticked(&schema.primary_keys),
            backticked(schema.clustering_keys()),
            max_staleness_seconds
        )
    }
}

/// Render a `CREATE SCHEMA IF NOT EXISTS` statement, without trailing `;`.
pub fn render_create_dataset(project_id: &str, dataset: &str, options: &DatasetOptions) -> String {
    match &options.kms_key_name {
        Some(kms_key_name) => format!(
            "CREATE SCHEMA IF NOT EXISTS `{project_id}.{dataset}` OPTIONS(location='{}', default_kms_key_name='{kms_key_name}')",
            options.location
        ),
        None => format!(
            "CREATE SCHEMA IF NOT EXISTS `{project_id}.{dataset}` OPTIONS(location='{}')",
            options.location
        ),
    }
}

/// Generate the DDL creating `target` from discovered source columns.
///
/// With `dataset_options`, the table statement is preceded by a
/// `CREATE SCHEMA` statement for the target dataset.
pub fn generate_create_table_ddl(
    columns: &[SourceColumn],
    kind: SourceKind,
    target: &TableTarget,
    max_staleness_seconds: u64,
    dataset_options: Option<&DatasetOptions>,
) -> Result<String, DdlError> {
    let schema = build_table_schema(columns, kind, &target.fully_qualified())?;
    let create_table = render_create_table(&schema, max_staleness_seconds);
    tracing::info!("Generated create table DDL:\n{create_table}");

    let Some(options) = dataset_options else {
        return Ok(create_table);
    };

    let create_dataset = render_create_dataset(&target.project_id, &target.dataset, options);
    tracing::info!("Generated create dataset DDL: {create_dataset}");
    Ok(format!("{create_dataset};\n{create_table}"))
}

/// Generates target-table DDL for one stream configuration.
#[derive(Debug, Clone)]
pub struct CreateTableGenerator {
    pub kind: SourceKind,
    pub project_id: String,
    pub naming: DatasetNaming,
    pub max_staleness_seconds: u64,
}

impl CreateTableGenerator {
    pub fn new(
        kind: SourceKind,
        project_id: impl Into<String>,
        naming: DatasetNaming,
        max_staleness_seconds: u64,
    ) -> Self {
        Self {
            kind,
            project_id: project_id.into(),
            naming,
            max_staleness_seconds,
        }
    }

    /// BigQuery table that `schema.table` of the source is written to.
    pub fn target(&self, schema: &str, table: &str) -> TableTarget {
        self.naming.resolve(&self.project_id, schema, table)
    }

    /// DDL for the target of `schema.table`.
    pub fn generate(
        &self,
        columns: &[SourceColumn],
        schema: &str,
        table: &str,
    ) -> Result<String, DdlError> {
        let target = self.target(schema, table);
        let options = self.naming.dataset_options();
        generate_create_table_ddl(
            columns,
            self.kind,
            &target,
            self.max_staleness_seconds,
            options.as_ref(),
        )
    }
}
