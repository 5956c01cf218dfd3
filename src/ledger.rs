//! Partition Ledger: the `partitioned_tables` tracking table recording one
//! row per child partition created in a schema.

use crate::error::EngineError;
use crate::model::LedgerRecord;
use crate::pg::sqlgen::{escape_string, quote_ident, quote_qualified};
use crate::sink::ExecutionSink;

const LEDGER_TABLE: &str = "partitioned_tables";

/// Drops and recreates the tracking table for `schema`. Ledger maintenance
/// is a read/write-adjacent bookkeeping concern the engine always performs
/// live, even in script mode, so existing rows are not silently replayed
/// into the script output.
pub async fn init_ledger(sink: &ExecutionSink, schema: &str) -> Result<(), EngineError> {
    let qualified = quote_qualified(schema, LEDGER_TABLE);
    let drop_sql = format!("DROP TABLE IF EXISTS {qualified};");
    sink.execute(&drop_sql, true).await?;

    let create_sql = format!(
        "CREATE TABLE {qualified} (\n    schema_name text NOT NULL,\n    table_name text NOT NULL,\n    partition_of_table_name text NOT NULL,\n    partition_type text NOT NULL,\n    partition_col text NOT NULL,\n    partition_parameters jsonb NOT NULL,\n    PRIMARY KEY ({schema_col}, {table_col})\n);",
        qualified = qualified,
        schema_col = quote_ident("schema_name"),
        table_col = quote_ident("table_name"),
    );
    sink.execute(&create_sql, true).await
}

/// Inserts one row for a created child partition.
pub async fn record_partition(sink: &ExecutionSink, schema: &str, record: &LedgerRecord) -> Result<(), EngineError> {
    let qualified = quote_qualified(schema, LEDGER_TABLE);
    let sql = format!(
        "INSERT INTO {qualified} (schema_name, table_name, partition_of_table_name, partition_type, partition_col, partition_parameters) VALUES ('{}', '{}', '{}', '{}', '{}', '{}'::jsonb);",
        escape_string(&record.schema_name),
        escape_string(&record.table_name),
        escape_string(&record.partition_of_table_name),
        escape_string(&record.partition_type),
        escape_string(&record.partition_col),
        escape_string(&record.partition_parameters.to_string()),
    );
    sink.execute(&sql, true).await
}
