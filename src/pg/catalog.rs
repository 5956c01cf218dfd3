//! Catalog Inspector: reads column shape for target tables, memoised
//! process-wide since the same table can be revisited across schemas sharing
//! a wildcard directive within one run.

use crate::error::EngineError;
use crate::model::Column;
use crate::sink::ExecutionSink;
use sqlx::Row;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-wide cache keyed by `(schema, table)`, mirroring the teacher's
/// per-run introspection pass but scoped down to the columns this engine
/// actually needs.
#[derive(Default)]
pub struct CatalogCache {
    cache: Mutex<HashMap<(String, String), Vec<Column>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ordered column descriptors for each of `table_names` found
    /// in `schema`. Tables that do not exist, or that are not ordinary tables
    /// (views, partitioned parents, partitions themselves), are silently
    /// absent from the result map.
    pub async fn describe(
        &self,
        sink: &ExecutionSink,
        schema: &str,
        table_names: &[String],
    ) -> Result<HashMap<String, Vec<Column>>, EngineError> {
        let mut out = HashMap::new();
        for table in table_names {
            let key = (schema.to_string(), table.clone());
            let cached = {
                let guard = self.cache.lock().expect("catalog cache mutex poisoned");
                guard.get(&key).cloned()
            };
            let columns = match cached {
                Some(columns) => columns,
                None => {
                    let fetched = fetch_columns(sink, schema, table).await?;
                    if !fetched.is_empty() {
                        self.cache
                            .lock()
                            .expect("catalog cache mutex poisoned")
                            .insert(key, fetched.clone());
                    }
                    fetched
                }
            };
            if !columns.is_empty() {
                out.insert(table.clone(), columns);
            }
        }
        Ok(out)
    }
}

async fn fetch_columns(sink: &ExecutionSink, schema: &str, table: &str) -> Result<Vec<Column>, EngineError> {
    let rows = sqlx::query(
        r#"
        SELECT
            c.column_name,
            c.data_type,
            c.character_maximum_length,
            c.numeric_precision,
            c.numeric_scale,
            c.is_nullable,
            c.column_default
        FROM information_schema.columns c
        JOIN pg_catalog.pg_class t ON t.relname = c.table_name AND t.relkind = 'r'
        JOIN pg_catalog.pg_namespace n ON n.oid = t.relnamespace AND n.nspname = c.table_schema
        WHERE c.table_schema = $1 AND c.table_name = $2
        ORDER BY c.ordinal_position
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(sink.pool())
    .await
    .map_err(|e| EngineError::Catalog(format!("failed to describe {schema}.{table}: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let name: String = row.get("column_name");
            let data_type: String = row.get("data_type");
            let character_maximum_length: Option<i32> = row.get("character_maximum_length");
            let numeric_precision: Option<i32> = row.get("numeric_precision");
            let numeric_scale: Option<i32> = row.get("numeric_scale");
            let is_nullable: String = row.get("is_nullable");
            let default: Option<String> = row.get("column_default");
            Column {
                schema: schema.to_string(),
                table: table.to_string(),
                name,
                data_type,
                character_maximum_length,
                numeric_precision,
                numeric_scale,
                not_null: is_nullable == "NO",
                default,
            }
        })
        .collect())
}
