//! `INSERT ... SELECT` generation between two BigQuery tables.
//!
//! The source table was created by Dataflow's "Datastream to BigQuery"
//! template and the destination by Datastream's native BigQuery writer. The
//! two choose different types for some source columns; [`CAST_RULES`] lists
//! the casts that bridge those differences.

use crate::error::{CopyRowsError, MissingFrom};
use crate::parser::parse_create_table;
use bq_core::{TableSchema, TypeKind};

/// A cast expression template between two column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastRule {
    pub source: TypeKind,
    pub destination: TypeKind,
    /// Expression with `{column}` standing for the back-quoted column name
    pub template: &'static str,
}

impl CastRule {
    /// Substitute `column` into the template.
    pub fn apply(&self, column: &str) -> String {
        self.template.replace("{column}", column)
    }
}

/// Every supported cast. Pairs with equal kinds never appear here.
pub const CAST_RULES: &[CastRule] = &[
    // MySQL BINARY, VARBINARY; Oracle BLOB
    CastRule {
        source: TypeKind::Bytes,
        destination: TypeKind::String,
        template: "SAFE_CONVERT_BYTES_TO_STRING({column})",
    },
    // MySQL DATETIME
    CastRule {
        source: TypeKind::Timestamp,
        destination: TypeKind::Datetime,
        template: "CAST({column} as DATETIME)",
    },
    // MySQL DECIMAL
    CastRule {
        source: TypeKind::BigNumeric,
        destination: TypeKind::Numeric,
        template: "CAST({column} as NUMERIC)",
    },
    // MySQL DECIMAL, Oracle NUMBER
    CastRule {
        source: TypeKind::BigNumeric,
        destination: TypeKind::String,
        template: "CAST({column} as STRING)",
    },
    // MySQL TIME, stored by Dataflow as microseconds
    CastRule {
        source: TypeKind::String,
        destination: TypeKind::Interval,
        template: "MAKE_INTERVAL(hour=>DIV(CAST({column} as INT64), 3600000000), second=>DIV(MOD(CAST({column} as INT64), 3600000000), 1000000)) as {column}",
    },
    // MySQL YEAR
    CastRule {
        source: TypeKind::String,
        destination: TypeKind::Int64,
        template: "CAST({column} as INT64)",
    },
    // MySQL JSON
    CastRule {
        source: TypeKind::String,
        destination: TypeKind::Json,
        template: "PARSE_JSON({column})",
    },
    // Oracle NUMBER with negative scale
    CastRule {
        source: TypeKind::BigNumeric,
        destination: TypeKind::Int64,
        template: "CAST({column} as INT64)",
    },
];

/// Look up the cast between two kinds.
pub fn find_cast_rule(source: TypeKind, destination: TypeKind) -> Option<&'static CastRule> {
    CAST_RULES
        .iter()
        .find(|rule| rule.source == source && rule.destination == destination)
}

/// Whether `name` is a column Dataflow adds to the tables it replicates into
/// (`_metadata_timestamp`, `_metadata_deleted`, `datastream_metadata`, ...).
pub fn is_replication_metadata_column(name: &str) -> bool {
    name.starts_with("_metadata_") || name == "datastream_metadata"
}

/// Generate the statement copying every row of `source` into `destination`.
///
/// Both tables must have the same column names, except for replication
/// metadata columns of `source` that `destination` lacks, which are not
/// copied. Columns are listed in source order; a column whose types differ is
/// wrapped in its cast expression.
pub fn generate_copy_rows_sql(
    source: &TableSchema,
    destination: &TableSchema,
) -> Result<String, CopyRowsError> {
    let mut destination_columns = Vec::with_capacity(source.columns.len());
    let mut source_expressions = Vec::with_capacity(source.columns.len());

    for column in &source.columns {
        let Some(destination_type) = destination.get_column_type(&column.name) else {
            if is_replication_metadata_column(&column.name) {
                tracing::debug!("Skipping replication metadata column `{}`", column.name);
                continue;
            }
            return Err(CopyRowsError::SchemaMismatch {
                column: column.name.clone(),
                missing_from: MissingFrom::Destination,
                schema: destination.to_string(),
            });
        };
        let source_type = &column.column_type;
        let quoted = format!("`{}`", column.name);

        let expression = if source_type == destination_type {
            tracing::debug!("Type match for column {quoted}");
            quoted.clone()
        } else if source_type.kind() == destination_type.kind() {
            tracing::debug!(
                "Decimal parameters differ for column {quoted}: {source_type} ==> {destination_type}"
            );
            quoted.clone()
        } else {
            tracing::debug!(
                "Type mismatch for column {quoted}: {source_type} ==> {destination_type}"
            );
            let rule = find_cast_rule(source_type.kind(), destination_type.kind()).ok_or_else(
                || CopyRowsError::UnsupportedConversion {
                    column: column.name.clone(),
                    source_type: *source_type,
                    destination_type: *destination_type,
                },
            )?;
            rule.apply(&quoted)
        };

        destination_columns.push(quoted);
        source_expressions.push(expression);
    }

    if let Some(extra) = destination
        .columns
        .iter()
        .find(|column| source.get_column(&column.name).is_none())
    {
        return Err(CopyRowsError::SchemaMismatch {
            column: extra.name.clone(),
            missing_from: MissingFrom::Source,
            schema: source.to_string(),
        });
    }

    let sql = format!(
        "INSERT INTO `{}`\n(\n  {}\n)\nSELECT\n  {}\nFROM `{}`;",
        destination.table_name,
        destination_columns.join(",\n  "),
        source_expressions.join(",\n  "),
        source.table_name
    );
    tracing::info!("Generated copy rows SQL statement:\n{sql}");
    Ok(sql)
}

/// Parse both `CREATE TABLE` statements and generate the copy statement.
pub fn generate_copy_rows_sql_from_ddl(
    source_ddl: &str,
    destination_ddl: &str,
) -> Result<String, CopyRowsError> {
    let source = parse_create_table(source_ddl)?;
    let destination = parse_create_table(destination_ddl)?;
    generate_copy_rows_sql(&source, &destination)
}
