//! Query fetching the DDL of an existing BigQuery table.

/// `SELECT ddl FROM INFORMATION_SCHEMA.TABLES` for one table.
pub fn fetch_table_ddl_sql(project_id: &str, dataset: &str, table: &str) -> String {
    let sql = format!(
        "SELECT ddl FROM `{project_id}.{dataset}`.INFORMATION_SCHEMA.TABLES WHERE table_name='{table}';"
    );
    tracing::info!("Generated fetch DDL query: {sql}");
    sql
}
