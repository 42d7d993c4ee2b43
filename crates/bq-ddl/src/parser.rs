//! `CREATE TABLE` parsing.
//!
//! Reads back the column names, column types, primary key and table name of a
//! BigQuery `CREATE TABLE` statement. Two shapes are accepted:
//!
//! - the DDL generated by [`crate::render_create_table`], possibly preceded by
//!   a `CREATE SCHEMA` statement;
//! - the DDL BigQuery reports in `INFORMATION_SCHEMA.TABLES.ddl`, e.g. for
//!   tables created by the Dataflow "Datastream to BigQuery" template.
//!
//! Statements are parsed with `sqlparser`'s BigQuery dialect. Column options,
//! `PARTITION BY`, `CLUSTER BY` and table `OPTIONS(...)` are ignored.

use crate::error::DdlParseError;
use bq_core::{BigQueryType, SchemaError, TableSchema};
use sqlparser::ast::{CreateTable, DataType, ObjectName, Statement, TableConstraint};
use sqlparser::dialect::BigQueryDialect;
use sqlparser::keywords::Keyword;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};
use std::collections::HashSet;

type Result<T> = std::result::Result<T, DdlParseError>;

/// Parse the first `CREATE TABLE` statement of `ddl` into a [`TableSchema`].
///
/// Statements before it (e.g. `CREATE SCHEMA ...;`) are skipped without
/// being parsed.
///
/// # Example
///
/// ```
/// use bq_core::BigQueryType;
/// use bq_ddl::parse_create_table;
///
/// let schema = parse_create_table(
///     "CREATE TABLE `p.d.t` (id INT64 NOT NULL, amount NUMERIC(10, 2), PRIMARY KEY (id) NOT ENFORCED)",
/// )
/// .unwrap();
///
/// assert_eq!(schema.table_name, "p.d.t");
/// assert_eq!(schema.get_column_type("amount"), Some(&BigQueryType::numeric(10, 2)));
/// assert_eq!(schema.primary_keys, ["id"]);
/// ```
pub fn parse_create_table(ddl: &str) -> Result<TableSchema> {
    let dialect = BigQueryDialect {};
    let tokens = Tokenizer::new(&dialect, ddl)
        .tokenize()
        .map_err(|e| DdlParseError::Syntax(e.to_string()))?;

    let statement = tokens
        .split(|token| *token == Token::SemiColon)
        .find(|statement| starts_create_table(statement))
        .ok_or(DdlParseError::MissingCreateTable)?;

    let mut statement = statement.to_vec();
    let negative_scales = strip_negative_scales(&mut statement);

    let parsed = Parser::new(&dialect)
        .with_tokens(statement)
        .parse_statement()
        .map_err(|e| DdlParseError::Syntax(e.to_string()))?;

    match parsed {
        Statement::CreateTable(create_table) => table_schema(&create_table, &negative_scales),
        _ => Err(DdlParseError::MissingCreateTable),
    }
}

/// Remove the `-` of every `NUMERIC(p, -s)` style type and return the names
/// of the columns it was removed from.
///
/// sqlparser keeps decimal parameters unsigned, while an Oracle `NUMBER` with
/// a negative scale is generated as e.g. `NUMERIC(20, -2)`.
fn strip_negative_scales(tokens: &mut Vec<Token>) -> HashSet<String> {
    let significant: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| !matches!(token, Token::Whitespace(_)))
        .map(|(i, _)| i)
        .collect();

    let mut columns = HashSet::new();
    let mut signs = Vec::new();
    for window in significant.windows(7) {
        let [name, type_name, open, precision, comma, minus, scale] = window else {
            continue;
        };
        let is_decimal = matches!(
            &tokens[*type_name],
            Token::Word(word) if matches!(
                word.value.to_ascii_uppercase().as_str(),
                "NUMERIC" | "DECIMAL" | "BIGNUMERIC" | "BIGDECIMAL"
            )
        );
        if is_decimal
            && tokens[*open] == Token::LParen
            && matches!(tokens[*precision], Token::Number(..))
            && tokens[*comma] == Token::Comma
            && tokens[*minus] == Token::Minus
            && matches!(tokens[*scale], Token::Number(..))
        {
            if let Token::Word(word) = &tokens[*name] {
                columns.insert(word.value.clone());
                signs.push(*minus);
            }
        }
    }

    for index in signs.into_iter().rev() {
        tokens.remove(index);
    }
    columns
}

/// `CREATE [OR REPLACE] [TEMP | TEMPORARY] TABLE`
fn starts_create_table(tokens: &[Token]) -> bool {
    let mut keywords = tokens
        .iter()
        .filter(|token| !matches!(token, Token::Whitespace(_)))
        .map(|token| match token {
            Token::Word(word) => word.keyword,
            _ => Keyword::NoKeyword,
        });

    if keywords.next() != Some(Keyword::CREATE) {
        return false;
    }
    let mut next = keywords.next();
    if next == Some(Keyword::OR) {
        if keywords.next() != Some(Keyword::REPLACE) {
            return false;
        }
        next = keywords.next();
    }
    if matches!(next, Some(Keyword::TEMP | Keyword::TEMPORARY)) {
        next = keywords.next();
    }
    next == Some(Keyword::TABLE)
}

fn table_schema(
    create_table: &CreateTable,
    negative_scales: &HashSet<String>,
) -> Result<TableSchema> {
    let table_name = object_name(&create_table.name);
    if create_table.columns.is_empty() {
        return Err(if create_table.query.is_some() {
            DdlParseError::MissingColumnList { table: table_name }
        } else {
            DdlParseError::EmptyColumnList { table: table_name }
        });
    }

    let mut schema = TableSchema::new(table_name);
    for column in &create_table.columns {
        let column_type =
            bigquery_type(&column.data_type).ok_or_else(|| DdlParseError::UnsupportedType {
                column: column.name.value.clone(),
                type_name: column.data_type.to_string(),
            })?;
        let column_type = if negative_scales.contains(&column.name.value) {
            negate_scale(column_type)
        } else {
            column_type
        };
        schema
            .push_column(column.name.value.clone(), column_type)
            .map_err(table_error)?;
    }

    for constraint in &create_table.constraints {
        if let TableConstraint::PrimaryKey { columns, .. } = constraint {
            for key in columns {
                schema
                    .push_primary_key(key.value.clone())
                    .map_err(table_error)?;
            }
        }
    }

    tracing::debug!("Parsed DDL into schema {schema}");
    Ok(schema)
}

/// Join the parts of a possibly dotted or quoted name with `.`.
fn object_name(name: &ObjectName) -> String {
    name.0
        .iter()
        .map(|ident| ident.value.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

/// Map a parsed column type onto the closed BigQuery type set.
///
/// The type is matched on its rendered form, so aliases (`INTEGER`,
/// `DECIMAL(5)`, `BOOLEAN`) and `STRING(n)` lengths resolve the same way as
/// [`BigQueryType`]'s own parser. `ARRAY<...>`, `STRUCT<...>` and unknown
/// names give `None`.
fn bigquery_type(data_type: &DataType) -> Option<BigQueryType> {
    data_type.to_string().parse().ok()
}

fn negate_scale(column_type: BigQueryType) -> BigQueryType {
    match column_type {
        BigQueryType::Numeric(Some(params)) => BigQueryType::numeric(params.precision, -params.scale),
        BigQueryType::BigNumeric(Some(params)) => {
            BigQueryType::bignumeric(params.precision, -params.scale)
        }
        other => other,
    }
}

fn table_error(err: SchemaError) -> DdlParseError {
    match err {
        SchemaError::DuplicateColumn { table, column } => {
            DdlParseError::DuplicateColumn { table, column }
        }
        SchemaError::ColumnNotFound { table, column } => {
            DdlParseError::UnknownPrimaryKey { table, column }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generated_ddl() {
        let ddl = "CREATE TABLE `proj.ds.tbl` \n(\n  `id` INT64,\n  `amount` NUMERIC(10, 2),\n  `raw` BIGNUMERIC,\n  PRIMARY KEY(`id`) NOT ENFORCED\n)\nCLUSTER BY `id`\nOPTIONS(\n  max_staleness=MAKE_INTERVAL(0, 0, 0, 0, 0, 900)\n);";
        let schema = parse_create_table(ddl).unwrap();

        assert_eq!(schema.table_name, "proj.ds.tbl");
        assert_eq!(schema.column_names(), ["id", "amount", "raw"]);
        assert_eq!(schema.get_column_type("id"), Some(&BigQueryType::Int64));
        assert_eq!(
            schema.get_column_type("amount"),
            Some(&BigQueryType::numeric(10, 2))
        );
        assert_eq!(
            schema.get_column_type("raw"),
            Some(&BigQueryType::BigNumeric(None))
        );
        assert_eq!(schema.primary_keys, ["id"]);
    }

    #[test]
    fn test_parse_skips_create_schema() {
        let ddl = "CREATE SCHEMA IF NOT EXISTS `proj.ds` OPTIONS(location='US');\nCREATE TABLE `proj.ds.t` \n(\n  `a` STRING\n)\n OPTIONS(\n  max_staleness=MAKE_INTERVAL(0, 0, 0, 0, 0, 0)\n);";
        let schema = parse_create_table(ddl).unwrap();
        assert_eq!(schema.table_name, "proj.ds.t");
        assert_eq!(schema.column_names(), ["a"]);
        assert!(schema.primary_keys.is_empty());
    }

    #[test]
    fn test_parse_information_schema_ddl() {
        let ddl = r#"CREATE TABLE `proj.source_ds.orders`
(
  id INT64 NOT NULL,
  created TIMESTAMP OPTIONS(description="creation time"),
  payload STRING(1024),
  data BYTES,
  price BIGNUMERIC(40, 2),
  _metadata_timestamp TIMESTAMP,
  _metadata_deleted BOOL,
  _metadata_change_type STRING
)
PARTITION BY DATE(_metadata_timestamp)
CLUSTER BY id
OPTIONS(
  description="Dataflow replica"
);"#;
        let schema = parse_create_table(ddl).unwrap();

        assert_eq!(schema.table_name, "proj.source_ds.orders");
        assert_eq!(
            schema.column_names(),
            [
                "id",
                "created",
                "payload",
                "data",
                "price",
                "_metadata_timestamp",
                "_metadata_deleted",
                "_metadata_change_type"
            ]
        );
        assert_eq!(schema.get_column_type("payload"), Some(&BigQueryType::String));
        assert_eq!(
            schema.get_column_type("price"),
            Some(&BigQueryType::bignumeric(40, 2))
        );
        assert_eq!(
            schema.get_column_type("_metadata_deleted"),
            Some(&BigQueryType::Bool)
        );
    }

    #[test]
    fn test_parse_keeps_metadata_named_source_columns() {
        let ddl = "CREATE TABLE `p.d.t` \n(\n  `id` INT64,\n  `_metadata_source` STRING,\n  `datastream_metadata` JSON\n)\n OPTIONS(\n  max_staleness=MAKE_INTERVAL(0, 0, 0, 0, 0, 0)\n);";
        let schema = parse_create_table(ddl).unwrap();
        assert_eq!(
            schema.column_names(),
            ["id", "_metadata_source", "datastream_metadata"]
        );
    }

    #[test]
    fn test_parse_dotted_table_name_and_replace() {
        let schema =
            parse_create_table("CREATE OR REPLACE TABLE `p`.`d`.t (x DATE)").unwrap();
        assert_eq!(schema.table_name, "p.d.t");
        assert_eq!(schema.get_column_type("x"), Some(&BigQueryType::Date));
    }

    #[test]
    fn test_parse_type_aliases() {
        let schema = parse_create_table(
            "CREATE TABLE t (a INTEGER, b DECIMAL(5), c BIGDECIMAL(50, 10), d FLOAT, e datetime, f BOOLEAN)",
        )
        .unwrap();
        assert_eq!(schema.get_column_type("a"), Some(&BigQueryType::Int64));
        assert_eq!(
            schema.get_column_type("b"),
            Some(&BigQueryType::numeric(5, 0))
        );
        assert_eq!(
            schema.get_column_type("c"),
            Some(&BigQueryType::bignumeric(50, 10))
        );
        assert_eq!(schema.get_column_type("d"), Some(&BigQueryType::Float64));
        assert_eq!(schema.get_column_type("e"), Some(&BigQueryType::Datetime));
        assert_eq!(schema.get_column_type("f"), Some(&BigQueryType::Bool));
    }

    #[test]
    fn test_parse_negative_scale() {
        let schema = parse_create_table(
            "CREATE TABLE t (`a` NUMERIC(20, -2), b BIGNUMERIC(30,-5), c NUMERIC(10, 2), d INT64 OPTIONS(description='x, -1'))",
        )
        .unwrap();
        assert_eq!(
            schema.get_column_type("a"),
            Some(&BigQueryType::numeric(20, -2))
        );
        assert_eq!(
            schema.get_column_type("b"),
            Some(&BigQueryType::bignumeric(30, -5))
        );
        assert_eq!(
            schema.get_column_type("c"),
            Some(&BigQueryType::numeric(10, 2))
        );
        assert_eq!(schema.get_column_type("d"), Some(&BigQueryType::Int64));
    }

    #[test]
    fn test_parse_skips_other_constraints() {
        let schema = parse_create_table(
            "CREATE TABLE t (a INT64, b INT64, CONSTRAINT fk FOREIGN KEY (b) REFERENCES o(id) NOT ENFORCED, PRIMARY KEY (a, b) NOT ENFORCED)",
        )
        .unwrap();
        assert_eq!(schema.column_names(), ["a", "b"]);
        assert_eq!(schema.primary_keys, ["a", "b"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_create_table("SELECT 1"),
            Err(DdlParseError::MissingCreateTable)
        );
        assert_eq!(
            parse_create_table("CREATE SCHEMA `p.d`;"),
            Err(DdlParseError::MissingCreateTable)
        );
        assert_eq!(
            parse_create_table("CREATE TABLE t AS SELECT 1"),
            Err(DdlParseError::MissingColumnList {
                table: "t".to_string()
            })
        );
        assert_eq!(
            parse_create_table("CREATE TABLE t ()"),
            Err(DdlParseError::EmptyColumnList {
                table: "t".to_string()
            })
        );
        assert!(matches!(
            parse_create_table("CREATE TABLE t (a INT64"),
            Err(DdlParseError::Syntax(_))
        ));
        assert!(matches!(
            parse_create_table("CREATE TABLE `p.d.t (a INT64)"),
            Err(DdlParseError::Syntax(_))
        ));
        assert_eq!(
            parse_create_table("CREATE TABLE t (a INT64, a STRING)"),
            Err(DdlParseError::DuplicateColumn {
                table: "t".to_string(),
                column: "a".to_string()
            })
        );
        assert_eq!(
            parse_create_table("CREATE TABLE t (a INT64, PRIMARY KEY (b) NOT ENFORCED)"),
            Err(DdlParseError::UnknownPrimaryKey {
                table: "t".to_string(),
                column: "b".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_unsupported_types() {
        assert!(matches!(
            parse_create_table("CREATE TABLE t (shape GEOGRAPHY)"),
            Err(DdlParseError::UnsupportedType { ref column, .. }) if column == "shape"
        ));
        assert!(matches!(
            parse_create_table("CREATE TABLE t (tags ARRAY<STRING>, b INT64)"),
            Err(DdlParseError::UnsupportedType { ref column, .. }) if column == "tags"
        ));
    }

    #[test]
    fn test_starts_create_table() {
        let dialect = BigQueryDialect {};
        let starts = |sql: &str| {
            let tokens = Tokenizer::new(&dialect, sql).tokenize().unwrap();
            starts_create_table(&tokens)
        };

        assert!(starts("CREATE TABLE t (a INT64)"));
        assert!(starts("  -- comment\n create or replace temp table t (a INT64)"));
        assert!(!starts("CREATE SCHEMA s"));
        assert!(!starts("CREATE OR TABLE t"));
        assert!(!starts("SELECT 1"));
    }
}
