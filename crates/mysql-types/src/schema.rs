//! MySQL schema column type conversion.
//!
//! This module maps MySQL column types from a Datastream discovery document to
//! BigQuery types, following Datastream's own BigQuery mapping:
//! <https://cloud.google.com/datastream/docs/destination-bigquery#map_data_types>

use bq_core::{resolve_decimal, BigQueryType, ColumnConverter, SourceColumn, SourceKind};

/// Converter for MySQL source columns.
///
/// Unmapped type names fall back to `STRING` with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlColumnConverter;

impl ColumnConverter for MySqlColumnConverter {
    fn source_kind(&self) -> SourceKind {
        SourceKind::MySql
    }

    fn lookup(&self, column: &SourceColumn) -> Option<BigQueryType> {
        let mysql_type = column.upper_data_type();
        if mysql_type == "DECIMAL" {
            return Some(convert_mysql_decimal(column));
        }
        mysql_type_to_bigquery_type(&mysql_type)
    }

    fn warns_on_fallback(&self) -> bool {
        true
    }
}

/// Convert a MySQL column descriptor to a BigQuery type.
///
/// `DECIMAL` is resolved from its precision and scale; every other type goes
/// through [`mysql_type_to_bigquery_type`], falling back to `STRING`.
///
/// # Example
///
/// ```
/// use bq_core::{BigQueryType, SourceColumn};
/// use mysql_types::mysql_column_to_bigquery_type;
///
/// let column = SourceColumn::new("created", "timestamp");
/// assert_eq!(mysql_column_to_bigquery_type(&column), BigQueryType::Timestamp);
///
/// // DECIMAL without precision becomes an unparameterised BIGNUMERIC
/// let column = SourceColumn::new("amount", "DECIMAL");
/// assert_eq!(mysql_column_to_bigquery_type(&column), BigQueryType::BigNumeric(None));
/// ```
pub fn mysql_column_to_bigquery_type(column: &SourceColumn) -> BigQueryType {
    MySqlColumnConverter.convert(column)
}

/// Look up an uppercased MySQL type name in the fixed mapping table.
///
/// Returns `None` for names the table does not list (including `DECIMAL`,
/// which depends on precision and scale).
pub fn mysql_type_to_bigquery_type(mysql_type: &str) -> Option<BigQueryType> {
    let bigquery_type = match mysql_type {
        // Integer types
        "BIGINT" | "BIT" | "BOOL" | "INT" | "INTEGER" | "MEDIUMINT" | "SMALLINT"
        | "TINYINT" | "YEAR" => BigQueryType::Int64,

        // Floating point
        "DOUBLE" | "FLOAT" => BigQueryType::Float64,

        // String and binary types
        "BINARY" | "BLOB" | "CHAR" | "ENUM" | "LONGBLOB" | "LONGTEXT" | "MEDIUMBLOB"
        | "MEDIUMTEXT" | "SET" | "TEXT" | "TINYBLOB" | "TINYTEXT" | "VARBINARY" | "VARCHAR" => {
            BigQueryType::String
        }

        // Date/Time types
        "DATE" => BigQueryType::Date,
        "DATETIME" => BigQueryType::Datetime,
        "TIME" => BigQueryType::Interval,
        "TIMESTAMP" => BigQueryType::Timestamp,

        // JSON
        "JSON" => BigQueryType::Json,

        _ => return None,
    };
    Some(bigquery_type)
}

fn convert_mysql_decimal(column: &SourceColumn) -> BigQueryType {
    match column.precision {
        None => BigQueryType::BigNumeric(None),
        Some(precision) => resolve_decimal(precision, column.effective_scale()),
    }
}
