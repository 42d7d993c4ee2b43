//! Per-source-kind key vocabulary of the discovery document.

use bq_core::SourceKind;

/// JSON keys locating schemas, tables and columns for one source kind.
///
/// Both kinds describe the same shape:
///
/// ```text
/// { <rdbms>: { <schema_list>: [
///     { <schema_name>: "...", <table_list>: [
///         { <table_name>: "...", <column_list>: [ {column, dataType, ...} ] }
///     ] }
/// ] } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverKeys {
    pub rdbms: &'static str,
    pub schema_list: &'static str,
    pub schema_name: &'static str,
    pub table_list: &'static str,
    pub column_list: &'static str,
    pub table_name: &'static str,
}

impl DiscoverKeys {
    pub const MYSQL: DiscoverKeys = DiscoverKeys {
        rdbms: "mysqlRdbms",
        schema_list: "mysqlDatabases",
        schema_name: "database",
        table_list: "mysqlTables",
        column_list: "mysqlColumns",
        table_name: "table",
    };

    pub const ORACLE: DiscoverKeys = DiscoverKeys {
        rdbms: "oracleRdbms",
        schema_list: "oracleSchemas",
        schema_name: "schema",
        table_list: "oracleTables",
        column_list: "oracleColumns",
        table_name: "table",
    };

    /// Key table for the given source kind.
    pub fn for_kind(kind: SourceKind) -> &'static DiscoverKeys {
        match kind {
            SourceKind::MySql => &Self::MYSQL,
            SourceKind::Oracle => &Self::ORACLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_vocabularies_are_disjoint() {
        let mysql = DiscoverKeys::for_kind(SourceKind::MySql);
        let oracle = DiscoverKeys::for_kind(SourceKind::Oracle);
        assert_ne!(mysql.rdbms, oracle.rdbms);
        assert_ne!(mysql.schema_list, oracle.schema_list);
        assert_ne!(mysql.schema_name, oracle.schema_name);
        assert_ne!(mysql.table_list, oracle.table_list);
        assert_ne!(mysql.column_list, oracle.column_list);
        assert_eq!(mysql.table_name, oracle.table_name);
    }
}
