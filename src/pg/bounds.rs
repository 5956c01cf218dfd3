//! Bounds Prober: finds the actual min/max partition-key values in a source
//! table, substituting temporal defaults when the table is empty.

use crate::error::EngineError;
use crate::model::{is_temporal_type, TableInfo};
use crate::sink::ExecutionSink;
use crate::value::PartitionValue;
use chrono::Utc;
use sqlx::Row;

const EMPTY_TABLE_MONTHS_OFFSET: i64 = 6;

/// Returns `(min_value, max_value)` for the configured partition column.
///
/// An empty table with a date/timestamp partition column falls back to
/// `(first day of the month six months ago, first day of the month six
/// months from now)`. An empty table on any other column type is rejected --
/// the specification leaves that case undefined, and this engine refuses to
/// guess.
pub async fn bounds(sink: &ExecutionSink, schema: &str, table_info: &TableInfo) -> Result<(PartitionValue, PartitionValue), EngineError> {
    let column = table_info.partition_column().ok_or_else(|| {
        EngineError::InvalidConfig(format!(
            "table '{}' has no column named '{}'",
            table_info.table_name(),
            table_info.directive.partition_key
        ))
    })?;

    let qualified = format!(
        "\"{}\".\"{}\"",
        schema.replace('"', "\"\""),
        table_info.table_name().replace('"', "\"\"")
    );
    let column_ident = format!("\"{}\"", column.name.replace('"', "\"\""));

    let row = sqlx::query(&format!(
        "SELECT MIN({col})::text AS lo, MAX({col})::text AS hi FROM {table}",
        col = column_ident,
        table = qualified
    ))
    .fetch_one(sink.pool())
    .await
    .map_err(|e| EngineError::Catalog(format!("failed to probe bounds for {schema}.{}: {e}", table_info.table_name())))?;

    let lo: Option<String> = row.get("lo");
    let hi: Option<String> = row.get("hi");

    match (lo, hi) {
        (Some(lo), Some(hi)) => {
            let low = PartitionValue::parse(&column.data_type, &lo)?;
            let high = PartitionValue::parse(&column.data_type, &hi)?;
            Ok((low, high))
        }
        _ if is_temporal_type(&column.data_type) => {
            let today = Utc::now().date_naive();
            let low = PartitionValue::temporal_default(&column.data_type, today, -EMPTY_TABLE_MONTHS_OFFSET)
                .expect("temporal_default defined for every temporal catalog type");
            let high = PartitionValue::temporal_default(&column.data_type, today, EMPTY_TABLE_MONTHS_OFFSET)
                .expect("temporal_default defined for every temporal catalog type");
            Ok((low, high))
        }
        _ => Err(EngineError::EmptyNonTemporal {
            schema: schema.to_string(),
            table: table_info.table_name().to_string(),
            column: column.name.clone(),
        }),
    }
}
