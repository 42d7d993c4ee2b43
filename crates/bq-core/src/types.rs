//! BigQuery column types.
//!
//! This module defines `BigQueryType`, the closed set of target types the
//! migration toolkit can produce or read back from BigQuery DDL.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Precision and scale of a `NUMERIC` or `BIGNUMERIC` column.
///
/// Values are kept signed: Oracle reports negative scales for `NUMBER(p, -s)`
/// columns and the decimal resolution carries them through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalParams {
    /// Total number of digits
    pub precision: i64,
    /// Number of digits after the decimal point
    pub scale: i64,
}

impl DecimalParams {
    pub fn new(precision: i64, scale: i64) -> Self {
        Self { precision, scale }
    }
}

/// BigQuery column type.
///
/// Equality is structural: `NUMERIC(10, 2)` and `NUMERIC(10, 3)` are different
/// types, and a bare `NUMERIC` differs from any parameterised one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BigQueryType {
    String,
    Int64,
    /// Only read back from DDL; no source column converts to it
    Bool,
    Float64,
    Bytes,
    Timestamp,
    Interval,
    Date,
    Datetime,
    Json,
    /// `NUMERIC`, optionally parameterised
    Numeric(Option<DecimalParams>),
    /// `BIGNUMERIC`, optionally parameterised
    BigNumeric(Option<DecimalParams>),
}

/// Parameter-free tag of a `BigQueryType`.
///
/// Cast rules between two tables are keyed by kind, so that a
/// `BIGNUMERIC(40, 2)` → `NUMERIC(10, 2)` column picks the same rule as a bare
/// `BIGNUMERIC` → `NUMERIC` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    String,
    Int64,
    Bool,
    Float64,
    Bytes,
    Timestamp,
    Interval,
    Date,
    Datetime,
    Json,
    Numeric,
    BigNumeric,
}

impl TypeKind {
    /// The BigQuery keyword for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Int64 => "INT64",
            Self::Bool => "BOOL",
            Self::Float64 => "FLOAT64",
            Self::Bytes => "BYTES",
            Self::Timestamp => "TIMESTAMP",
            Self::Interval => "INTERVAL",
            Self::Date => "DATE",
            Self::Datetime => "DATETIME",
            Self::Json => "JSON",
            Self::Numeric => "NUMERIC",
            Self::BigNumeric => "BIGNUMERIC",
        }
    }

    /// Look up a type keyword, accepting the aliases BigQuery itself accepts.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword.to_uppercase().as_str() {
            "STRING" => Self::String,
            "INT64" | "INT" | "SMALLINT" | "INTEGER" | "BIGINT" | "TINYINT" | "BYTEINT" => {
                Self::Int64
            }
            "BOOL" | "BOOLEAN" => Self::Bool,
            "FLOAT64" | "FLOAT" => Self::Float64,
            "BYTES" => Self::Bytes,
            "TIMESTAMP" => Self::Timestamp,
            "INTERVAL" => Self::Interval,
            "DATE" => Self::Date,
            "DATETIME" => Self::Datetime,
            "JSON" => Self::Json,
            "NUMERIC" | "DECIMAL" => Self::Numeric,
            "BIGNUMERIC" | "BIGDECIMAL" => Self::BigNumeric,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind takes precision and scale parameters.
    pub fn is_decimal(self) -> bool {
        matches!(self, Self::Numeric | Self::BigNumeric)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl BigQueryType {
    /// Create a parameterised `NUMERIC` type.
    pub fn numeric(precision: i64, scale: i64) -> Self {
        Self::Numeric(Some(DecimalParams::new(precision, scale)))
    }

    /// Create a parameterised `BIGNUMERIC` type.
    pub fn bignumeric(precision: i64, scale: i64) -> Self {
        Self::BigNumeric(Some(DecimalParams::new(precision, scale)))
    }

    /// The parameter-free kind of this type.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::String => TypeKind::String,
            Self::Int64 => TypeKind::Int64,
            Self::Bool => TypeKind::Bool,
            Self::Float64 => TypeKind::Float64,
            Self::Bytes => TypeKind::Bytes,
            Self::Timestamp => TypeKind::Timestamp,
            Self::Interval => TypeKind::Interval,
            Self::Date => TypeKind::Date,
            Self::Datetime => TypeKind::Datetime,
            Self::Json => TypeKind::Json,
            Self::Numeric(_) => TypeKind::Numeric,
            Self::BigNumeric(_) => TypeKind::BigNumeric,
        }
    }

    /// Decimal parameters, if this is a parameterised decimal type.
    pub fn decimal_params(&self) -> Option<DecimalParams> {
        match self {
            Self::Numeric(params) | Self::BigNumeric(params) => *params,
            _ => None,
        }
    }

    /// Build a type from a keyword and the integers found in its parentheses.
    ///
    /// Length parameters of `STRING(n)` and `BYTES(n)` are dropped. A single
    /// decimal parameter means scale 0. Returns `None` for unknown keywords or
    /// parameter counts BigQuery would reject.
    pub fn from_parts(keyword: &str, params: &[i64]) -> Option<Self> {
        let kind = TypeKind::from_keyword(keyword)?;
        let ty = match kind {
            TypeKind::Numeric | TypeKind::BigNumeric => {
                let params = match params {
                    [] => None,
                    [precision] => Some(DecimalParams::new(*precision, 0)),
                    [precision, scale] => Some(DecimalParams::new(*precision, *scale)),
                    _ => return None,
                };
                return Some(if kind == TypeKind::Numeric {
                    Self::Numeric(params)
                } else {
                    Self::BigNumeric(params)
                });
            }
            TypeKind::String => Self::String,
            TypeKind::Bytes => Self::Bytes,
            TypeKind::Int64 => Self::Int64,
            TypeKind::Bool => Self::Bool,
            TypeKind::Float64 => Self::Float64,
            TypeKind::Timestamp => Self::Timestamp,
            TypeKind::Interval => Self::Interval,
            TypeKind::Date => Self::Date,
            TypeKind::Datetime => Self::Datetime,
            TypeKind::Json => Self::Json,
        };

        // Only STRING(n) and BYTES(n) carry a (dropped) length parameter.
        let max_params = match kind {
            TypeKind::String | TypeKind::Bytes => 1,
            _ => 0,
        };
        (params.len() <= max_params).then_some(ty)
    }
}

impl fmt::Display for BigQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decimal_params() {
            Some(DecimalParams { precision, scale }) => {
                write!(f, "{}({precision}, {scale})", self.kind())
            }
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// Error returned when a type string cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown BigQuery type: {0}")]
pub struct UnknownTypeError(pub String);

impl FromStr for BigQueryType {
    type Err = UnknownTypeError;

    /// Parse the rendered form, e.g. `INT64`, `NUMERIC(10, 2)`, `STRING(255)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownTypeError(s.to_string());
        let trimmed = s.trim();

        let (keyword, params) = match trimmed.find('(') {
            Some(open) => {
                let inner = trimmed[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(unknown)?;
                let params = inner
                    .split(',')
                    .map(|p| p.trim().parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| unknown())?;
                (trimmed[..open].trim(), params)
            }
            None => (trimmed, Vec::new()),
        };

        Self::from_parts(keyword, &params).ok_or_else(unknown)
    }
}

// Serialized as the rendered DDL form so that schemas dumped to JSON or YAML
// read the same as the generated DDL.

impl Serialize for BigQueryType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigQueryType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
