//! Oracle schema column type conversion.
//!
//! This module maps Oracle column types from a Datastream discovery document
//! to BigQuery types, following Datastream's own BigQuery mapping:
//! <https://cloud.google.com/datastream/docs/destination-bigquery#map_data_types>

use bq_core::{
    resolve_decimal, BigQueryType, ColumnConverter, SourceColumn, SourceKind,
    BIGNUMERIC_MAX_PRECISION, INT64_MAX_PRECISION,
};

/// Converter for Oracle source columns.
///
/// Unmapped type names fall back to `STRING` silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleColumnConverter;

impl ColumnConverter for OracleColumnConverter {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Oracle
    }

    fn lookup(&self, column: &SourceColumn) -> Option<BigQueryType> {
        let oracle_type = column.upper_data_type();
        if oracle_type == "NUMBER" {
            return Some(convert_oracle_number(column));
        }
        if oracle_type.starts_with("TIMESTAMP") {
            return oracle_type_to_bigquery_type("TIMESTAMP");
        }
        oracle_type_to_bigquery_type(&oracle_type)
    }

    fn warns_on_fallback(&self) -> bool {
        false
    }
}

/// Convert an Oracle column descriptor to a BigQuery type.
///
/// `NUMBER` is resolved from its precision and scale. `TIMESTAMP(n)` and its
/// time zone variants all map to `TIMESTAMP`. Unknown types become `STRING`.
///
/// # Example
///
/// ```
/// use bq_core::{BigQueryType, SourceColumn};
/// use oracle_types::oracle_column_to_bigquery_type;
///
/// let column = SourceColumn::new("ts", "TIMESTAMP(6) WITH LOCAL TIME ZONE");
/// assert_eq!(oracle_column_to_bigquery_type(&column), BigQueryType::Timestamp);
///
/// let column = SourceColumn::new("n", "NUMBER");
/// assert_eq!(oracle_column_to_bigquery_type(&column), BigQueryType::String);
/// ```
pub fn oracle_column_to_bigquery_type(column: &SourceColumn) -> BigQueryType {
    OracleColumnConverter.convert(column)
}

/// Look up an uppercased Oracle type name in the fixed mapping table.
pub fn oracle_type_to_bigquery_type(oracle_type: &str) -> Option<BigQueryType> {
    let bigquery_type = match oracle_type {
        // Character, binary and row id types
        "BFILE" | "CHAR" | "LONG" | "LONG_RAW" | "NCHAR" | "NVARCHAR2" | "RAW" | "ROWID"
        | "UROWID" | "VARCHAR" | "VARCHAR2" => BigQueryType::String,

        // Floating point
        "BINARY_DOUBLE" | "BINARY_FLOAT" | "DOUBLE_PRECISION" | "FLOAT" => BigQueryType::Float64,

        // Integer
        "SMALLINT" => BigQueryType::Int64,

        // Oracle DATE carries a time component
        "DATE" => BigQueryType::Datetime,
        "TIMESTAMP" | "TIMESTAMP WITH TIME ZONE" => BigQueryType::Timestamp,

        _ => return None,
    };
    Some(bigquery_type)
}

fn convert_oracle_number(column: &SourceColumn) -> BigQueryType {
    let precision = match column.precision {
        Some(precision) if precision != 0 => precision,
        _ => return BigQueryType::String,
    };
    let scale = column.effective_scale();

    if precision > BIGNUMERIC_MAX_PRECISION {
        return BigQueryType::String;
    }
    if scale <= 0 && precision <= INT64_MAX_PRECISION {
        return BigQueryType::Int64;
    }
    resolve_decimal(precision, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(data_type: &str) -> BigQueryType {
        OracleColumnConverter.convert(&SourceColumn::new("c", data_type))
    }

    fn number(precision: Option<i64>, scale: Option<i64>) -> BigQueryType {
        let mut column = SourceColumn::new("n", "NUMBER");
        column.precision = precision;
        column.scale = scale;
        OracleColumnConverter.convert(&column)
    }

    #[test]
    fn test_oracle_string_types() {
        for oracle_type in [
            "BFILE", "CHAR", "LONG", "LONG_RAW", "NCHAR", "NVARCHAR2", "RAW", "ROWID", "UROWID",
            "VARCHAR", "VARCHAR2",
        ] {
            assert_eq!(convert(oracle_type), BigQueryType::String, "{oracle_type}");
        }
    }

    #[test]
    fn test_oracle_float_types() {
        for oracle_type in ["BINARY_DOUBLE", "BINARY_FLOAT", "DOUBLE_PRECISION", "FLOAT"] {
            assert_eq!(convert(oracle_type), BigQueryType::Float64, "{oracle_type}");
        }
    }

    #[test]
    fn test_oracle_datetime_types() {
        assert_eq!(convert("DATE"), BigQueryType::Datetime);
        assert_eq!(convert("TIMESTAMP"), BigQueryType::Timestamp);
        assert_eq!(convert("TIMESTAMP WITH TIME ZONE"), BigQueryType::Timestamp);
        assert_eq!(convert("TIMESTAMP(6)"), BigQueryType::Timestamp);
        assert_eq!(
            convert("timestamp(9) with local time zone"),
            BigQueryType::Timestamp
        );
    }

    #[test]
    fn test_same_name_differs_from_mysql() {
        // MySQL DATE is a DATE; Oracle DATE has a time part
        assert_eq!(convert("DATE"), BigQueryType::Datetime);
        assert_eq!(convert("SMALLINT"), BigQueryType::Int64);
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        assert_eq!(convert("XMLTYPE"), BigQueryType::String);
        assert_eq!(convert("CLOB"), BigQueryType::String);
        assert_eq!(oracle_type_to_bigquery_type("CLOB"), None);
        assert!(!OracleColumnConverter.warns_on_fallback());
        assert_eq!(
            OracleColumnConverter.lookup(&SourceColumn::new("c", "XMLTYPE")),
            None
        );
    }

    #[test]
    fn test_number_without_precision() {
        assert_eq!(number(None, None), BigQueryType::String);
        assert_eq!(number(Some(0), Some(0)), BigQueryType::String);
    }

    #[test]
    fn test_number_integers() {
        assert_eq!(number(Some(18), Some(0)), BigQueryType::Int64);
        assert_eq!(number(Some(1), None), BigQueryType::Int64);
        assert_eq!(number(Some(10), Some(-2)), BigQueryType::Int64);
        assert_eq!(number(Some(19), Some(0)), resolve_decimal(19, 0));
        assert_eq!(number(Some(19), Some(0)), BigQueryType::numeric(19, 0));
        assert_eq!(number(Some(38), Some(0)), BigQueryType::bignumeric(38, 0));
        assert_eq!(number(Some(78), Some(0)), BigQueryType::String);
        assert_eq!(number(Some(79), Some(0)), BigQueryType::String);
    }

    #[test]
    fn test_number_with_scale() {
        assert_eq!(number(Some(10), Some(2)), BigQueryType::numeric(10, 2));
        assert_eq!(number(Some(5), Some(3)), BigQueryType::numeric(5, 3));
        assert_eq!(number(Some(40), Some(20)), BigQueryType::bignumeric(40, 20));
        assert_eq!(number(Some(79), Some(2)), BigQueryType::String);
    }

    #[test]
    fn test_convert_from_discover_json() {
        let column: SourceColumn = serde_json::from_str(
            r#"{"column": "ID", "dataType": "NUMBER", "precision": 12, "primaryKey": true}"#,
        )
        .unwrap();
        assert_eq!(OracleColumnConverter.convert(&column), BigQueryType::Int64);
    }
}
