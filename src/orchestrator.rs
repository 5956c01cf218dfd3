//! Orchestrator: drives the pipeline end to end for one run, translating
//! component errors and logging progress as it goes.

use crate::config::{Config, PartitionSpec};
use crate::error::EngineError;
use crate::ledger;
use crate::model::{LedgerRecord, PartitionKind, TableInfo};
use crate::pg::bounds;
use crate::pg::catalog::CatalogCache;
use crate::pg::schema;
use crate::pg::sqlgen;
use crate::planner::{ceil_value, floor_value, plan_list, plan_range};
use crate::sink::ExecutionSink;
use tracing::{error, info, warn};

/// Summary returned to the caller (CLI or embedding application) once a run completes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub schemas_processed: usize,
    pub tables_transformed: usize,
    pub partitions_created: usize,
}

/// Runs the full pipeline: enumerate schemas, and within each, every
/// configured directive, emitting DDL through `sink` and recording each
/// child partition in the ledger.
pub async fn run(sink: &ExecutionSink, config: &Config) -> Result<RunSummary, EngineError> {
    let cache = CatalogCache::new();
    let mut summary = RunSummary::default();

    let schemas = schema::schemas(sink, &config.excluded_schemata).await?;
    for schema_name in schemas {
        info!(schema = %schema_name, "entering schema");
        ledger::init_ledger(sink, &schema_name).await?;
        summary.schemas_processed += 1;

        let directives = config.targets_for(&schema_name);
        for directive in directives {
            match process_table(sink, &cache, &schema_name, directive).await {
                Ok(partitions_created) => {
                    summary.tables_transformed += 1;
                    summary.partitions_created += partitions_created;
                }
                Err(e) => {
                    error!(schema = %schema_name, table = %directive.table, error = %e, "table transformation failed");
                    return Err(e);
                }
            }
        }
    }

    Ok(summary)
}

async fn process_table(
    sink: &ExecutionSink,
    cache: &CatalogCache,
    schema_name: &str,
    directive: &crate::config::Directive,
) -> Result<usize, EngineError> {
    info!(schema = %schema_name, table = %directive.table, "processing table");

    let described = cache.describe(sink, schema_name, std::slice::from_ref(&directive.table)).await?;
    let columns = described.get(&directive.table).cloned().unwrap_or_default();
    if columns.is_empty() {
        warn!(schema = %schema_name, table = %directive.table, "table not found in catalog, skipping");
        return Ok(0);
    }

    let table_info = TableInfo {
        columns,
        directive: directive.clone(),
    };

    let target_schema = directive.target_schema.as_deref().unwrap_or(schema_name);
    let parallel = sqlgen::parallel_name(&directive.table);

    // Bounds and the resulting child list are computed before anything is
    // emitted, so a rejected directive (e.g. EmptyNonTemporal) leaves no
    // partial DDL behind.
    let children: Vec<(String, PartitionKind)> = match &directive.spec {
        PartitionSpec::Range { interval_type, interval } => {
            let (lo, hi) = bounds::bounds(sink, schema_name, &table_info).await?;
            let lo = floor_value(&lo, interval_type)?;
            let hi = ceil_value(&hi, interval_type)?;
            let ranges = plan_range(lo, hi, interval_type, *interval)?;

            ranges
                .into_iter()
                .map(|(low, high)| {
                    let suffix = low.name_suffix(interval_type);
                    let child = sqlgen::child_name(&directive.table, &suffix);
                    let kind = PartitionKind::Range {
                        low: low.sql_literal(),
                        high: high.sql_literal(),
                    };
                    (child, kind)
                })
                .collect()
        }
        PartitionSpec::List { value_lists } => plan_list(value_lists.clone())
            .into_iter()
            .enumerate()
            .map(|(index, members)| {
                let child = sqlgen::child_name(&directive.table, &index.to_string());
                let quoted_members = members
                    .iter()
                    .map(|m| format!("'{}'", sqlgen::escape_string(m)))
                    .collect::<Vec<_>>();
                (child, PartitionKind::List { members: quoted_members })
            })
            .collect(),
    };

    sink.execute(&sqlgen::build_partitioned_table_ddl(target_schema, &table_info), false)
        .await?;

    let default_child = sqlgen::child_name(&directive.table, "default");
    create_child(
        sink,
        schema_name,
        target_schema,
        &parallel,
        &default_child,
        &PartitionKind::Default,
        directive,
    )
    .await?;
    let mut partitions_created = 1;

    for (child, kind) in &children {
        create_child(sink, schema_name, target_schema, &parallel, child, kind, directive).await?;
        partitions_created += 1;
    }

    let swap_sql = sqlgen::build_swap_ddl(schema_name, &directive.table, target_schema, &parallel);
    sink.execute(&swap_sql, false).await?;

    let renamed_source = sqlgen::renamed_source_name(&directive.table);
    let copy_sql = sqlgen::build_copy_ddl(
        &sqlgen::quote_qualified(schema_name, &renamed_source),
        &sqlgen::quote_qualified(target_schema, &directive.table),
    );
    sink.execute(&copy_sql, false).await?;

    if directive.drop_table {
        sink.execute(&sqlgen::build_drop_ddl(schema_name, &renamed_source), false).await?;
    }

    info!(schema = %schema_name, table = %directive.table, partitions = partitions_created, "table transformation complete");
    Ok(partitions_created)
}

#[allow(clippy::too_many_arguments)]
async fn create_child(
    sink: &ExecutionSink,
    ledger_schema: &str,
    target_schema: &str,
    parallel: &str,
    child: &str,
    kind: &PartitionKind,
    directive: &crate::config::Directive,
) -> Result<(), EngineError> {
    info!(schema = %ledger_schema, table = %directive.table, partition = %child, "creating partition");
    sink.execute(&sqlgen::build_drop_child_ddl(target_schema, child), false).await?;
    sink.execute(&sqlgen::build_child_ddl(target_schema, parallel, child, kind, &directive.partition_key), false)
        .await?;
    ledger::record_partition(
        sink,
        ledger_schema,
        &LedgerRecord::new(ledger_schema, child, &directive.table, &directive.partition_key, kind),
    )
    .await?;
    Ok(())
}
