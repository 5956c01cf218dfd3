//! Schema Enumerator: yields the user schemas a run should process.

use crate::error::EngineError;
use crate::sink::ExecutionSink;
use sqlx::Row;
use std::collections::BTreeSet;

/// Returns the distinct schemas that own at least one user table, in lexical
/// order, with anything in `excluded_schemata` filtered out. Consults
/// `pg_stat_user_tables` rather than `pg_namespace` so empty or
/// system-owned schemas never appear.
pub async fn schemas(sink: &ExecutionSink, excluded_schemata: &BTreeSet<String>) -> Result<Vec<String>, EngineError> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT schemaname
        FROM pg_stat_user_tables
        ORDER BY schemaname
        "#,
    )
    .fetch_all(sink.pool())
    .await
    .map_err(|e| EngineError::Catalog(format!("failed to enumerate schemas: {e}")))?;

    let mut out = Vec::new();
    for row in rows {
        let name: String = row.get("schemaname");
        if !excluded_schemata.contains(&name) {
            out.push(name);
        }
    }
    Ok(out)
}
