//! Decimal precision/scale resolution shared by every source converter.
//!
//! Limits follow BigQuery's decimal types:
//! <https://cloud.google.com/bigquery/docs/reference/standard-sql/data-types#decimal_types>

use crate::types::BigQueryType;

/// Largest scale a `NUMERIC` column accepts.
pub const NUMERIC_MAX_SCALE: i64 = 9;
/// Largest number of integer digits (`precision - scale`) of a `NUMERIC`.
pub const NUMERIC_PRECISION_TO_SCALE_MAX_DIFF: i64 = 29;

/// Largest scale a `BIGNUMERIC` column accepts.
pub const BIGNUMERIC_MAX_SCALE: i64 = 38;
/// Largest number of integer digits (`precision - scale`) of a `BIGNUMERIC`.
pub const BIGNUMERIC_PRECISION_TO_SCALE_MAX_DIFF: i64 = 38;

/// Largest source precision that still fits into a `BIGNUMERIC`.
pub const BIGNUMERIC_MAX_PRECISION: i64 = 78;
/// Largest source precision of an integer that still fits into `INT64`.
pub const INT64_MAX_PRECISION: i64 = 18;

/// Pick the narrowest BigQuery decimal type that holds `precision` digits with
/// `scale` of them after the decimal point.
///
/// Values that exceed `BIGNUMERIC` degrade to `STRING` rather than failing.
///
/// # Example
///
/// ```
/// use bq_core::{resolve_decimal, BigQueryType};
///
/// assert_eq!(resolve_decimal(10, 2), BigQueryType::numeric(10, 2));
/// assert_eq!(resolve_decimal(30, 0), BigQueryType::bignumeric(30, 0));
/// assert_eq!(resolve_decimal(78, 40), BigQueryType::String);
/// ```
pub fn resolve_decimal(precision: i64, scale: i64) -> BigQueryType {
    let integer_digits = precision - scale;

    if scale <= NUMERIC_MAX_SCALE && integer_digits <= NUMERIC_PRECISION_TO_SCALE_MAX_DIFF {
        return BigQueryType::numeric(precision, scale);
    }
    if scale <= BIGNUMERIC_MAX_SCALE && integer_digits <= BIGNUMERIC_PRECISION_TO_SCALE_MAX_DIFF {
        return BigQueryType::bignumeric(precision, scale);
    }
    BigQueryType::String
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_boundary() {
        assert_eq!(resolve_decimal(29, 0), BigQueryType::numeric(29, 0));
        assert_eq!(resolve_decimal(38, 9), BigQueryType::numeric(38, 9));
        assert_eq!(resolve_decimal(30, 0), BigQueryType::bignumeric(30, 0));
        assert_eq!(resolve_decimal(20, 10), BigQueryType::bignumeric(20, 10));
    }

    #[test]
    fn test_bignumeric_boundary() {
        assert_eq!(resolve_decimal(76, 38), BigQueryType::bignumeric(76, 38));
        assert_eq!(resolve_decimal(77, 39), BigQueryType::String);
        assert_eq!(resolve_decimal(77, 38), BigQueryType::String);
        assert_eq!(resolve_decimal(78, 40), BigQueryType::String);
    }

    #[test]
    fn test_negative_scale_passes_through() {
        // 20 - (-2) = 22 integer digits still fits NUMERIC
        assert_eq!(resolve_decimal(20, -2), BigQueryType::numeric(20, -2));
        assert_eq!(resolve_decimal(30, -5), BigQueryType::bignumeric(30, -5));
    }
}
