//! DDL Emitter: renders the `CREATE TABLE`, swap, copy, and drop statements
//! the orchestrator issues through an [`crate::sink::ExecutionSink`].

use crate::model::{Column, PartitionKind, TableInfo};

/// Builds the parallel partitioned table's `CREATE TABLE` statement.
///
/// Indexes, constraints, and triggers on the source table are **not**
/// reproduced here -- only column shape, nullability, and defaults carry
/// over. Callers that need those must add them separately after the swap.
pub fn build_partitioned_table_ddl(schema: &str, table_info: &TableInfo) -> String {
    let parallel = quote_qualified(schema, &parallel_name(table_info.table_name()));
    let columns = table_info
        .columns
        .iter()
        .map(format_column)
        .collect::<Vec<_>>()
        .join(",\n    ");
    let partition_col = quote_ident(&table_info.directive.partition_key);
    let method = partition_method(table_info);

    format!("CREATE TABLE IF NOT EXISTS {parallel} (\n    {columns}\n) PARTITION BY {method} ({partition_col});")
}

fn partition_method(table_info: &TableInfo) -> &'static str {
    use crate::config::PartitionSpec;
    match table_info.directive.spec {
        PartitionSpec::Range { .. } => "RANGE",
        PartitionSpec::List { .. } => "LIST",
    }
}

/// Builds one child partition's `CREATE TABLE ... PARTITION OF` statement.
pub fn build_child_ddl(schema: &str, parent: &str, child: &str, kind: &PartitionKind, column: &str) -> String {
    let child_qualified = quote_qualified(schema, child);
    let parent_qualified = quote_qualified(schema, parent);
    let _ = column; // kept for symmetry with the ledger record; bound text is self-describing.

    match kind {
        PartitionKind::Default => {
            format!("CREATE TABLE {child_qualified} PARTITION OF {parent_qualified} DEFAULT;")
        }
        PartitionKind::Range { low, high } => format!(
            "CREATE TABLE {child_qualified} PARTITION OF {parent_qualified} FOR VALUES FROM ({low}) TO ({high});"
        ),
        PartitionKind::List { members } => {
            let list = members.join(", ");
            format!("CREATE TABLE {child_qualified} PARTITION OF {parent_qualified} FOR VALUES IN ({list});")
        }
    }
}

/// Builds the `DROP TABLE IF EXISTS` statement paired with every child
/// creation, so reruns do not fail on object existence.
pub fn build_drop_child_ddl(schema: &str, child: &str) -> String {
    format!("DROP TABLE IF EXISTS {};", quote_qualified(schema, child))
}

/// Builds the atomic swap transaction: lock the source, rename it aside,
/// rename the parallel table into its place.
pub fn build_swap_ddl(source_schema: &str, source_table: &str, target_schema: &str, parallel_table: &str) -> String {
    let source = quote_qualified(source_schema, source_table);
    let renamed = quote_ident(&format!("__{source_table}"));
    let parallel = quote_qualified(target_schema, parallel_table);
    let target_name = quote_ident(source_table);

    format!(
        "BEGIN;\nLOCK TABLE {source};\nALTER TABLE {source} RENAME TO {renamed};\nALTER TABLE {parallel} RENAME TO {target_name};\nCOMMIT;"
    )
}

/// Builds the post-swap data copy statement.
pub fn build_copy_ddl(from: &str, to: &str) -> String {
    format!("INSERT INTO {to} SELECT * FROM {from};")
}

/// Builds the statements that discard the renamed-aside original.
pub fn build_drop_ddl(schema: &str, table: &str) -> String {
    let qualified = quote_qualified(schema, table);
    format!("TRUNCATE {qualified};\nDROP TABLE {qualified};")
}

/// The parallel build-time name for a source table (`p_<name>`).
pub fn parallel_name(table: &str) -> String {
    format!("p_{table}")
}

/// The name a source table is renamed to during the swap (`__<name>`).
pub fn renamed_source_name(table: &str) -> String {
    format!("__{table}")
}

/// Builds a child partition's name from its parent and suffix (`<name>_<suffix>`).
pub fn child_name(parent: &str, suffix: &str) -> String {
    format!("{parent}_{suffix}")
}

fn format_column(column: &Column) -> String {
    let mut parts = vec![quote_ident(&column.name), column.rendered_type()];

    if column.not_null {
        parts.push("NOT NULL".to_string());
    }

    if let Some(ref default) = column.default {
        parts.push(format!("DEFAULT {default}"));
    }

    parts.join(" ")
}

pub fn quote_ident(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

pub fn quote_qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(name))
}

pub fn escape_string(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Directive, PartitionSpec};
    use crate::model::TableInfo;

    fn info(partition_key: &str, spec: PartitionSpec) -> TableInfo {
        TableInfo {
            columns: vec![
                Column {
                    schema: "public".into(),
                    table: "events".into(),
                    name: "id".into(),
                    data_type: "integer".into(),
                    character_maximum_length: None,
                    numeric_precision: None,
                    numeric_scale: None,
                    not_null: true,
                    default: None,
                },
                Column {
                    schema: "public".into(),
                    table: "events".into(),
                    name: partition_key.into(),
                    data_type: "date".into(),
                    character_maximum_length: None,
                    numeric_precision: None,
                    numeric_scale: None,
                    not_null: false,
                    default: Some("CURRENT_DATE".into()),
                },
            ],
            directive: Directive {
                table: "events".into(),
                target_schema: None,
                partition_key: partition_key.into(),
                spec,
                drop_table: false,
            },
        }
    }

    #[test]
    fn partitioned_table_ddl_uses_range_by_default() {
        let table_info = info(
            "occurred_at",
            PartitionSpec::Range {
                interval_type: "month".into(),
                interval: 1,
            },
        );
        let ddl = build_partitioned_table_ddl("public", &table_info);
        assert!(ddl.contains("PARTITION BY RANGE (\"occurred_at\")"));
        assert!(ddl.contains("\"id\" INTEGER NOT NULL"));
        assert!(ddl.contains("DEFAULT CURRENT_DATE"));
    }

    #[test]
    fn partitioned_table_ddl_uses_list_when_directed() {
        let table_info = info(
            "status",
            PartitionSpec::List {
                value_lists: vec![vec!["A".into()]],
            },
        );
        let ddl = build_partitioned_table_ddl("public", &table_info);
        assert!(ddl.contains("PARTITION BY LIST (\"status\")"));
    }

    #[test]
    fn default_child_has_no_for_values_clause() {
        let ddl = build_child_ddl("public", "events", "events_default", &PartitionKind::Default, "occurred_at");
        assert!(ddl.contains("DEFAULT;"));
        assert!(!ddl.contains("FOR VALUES"));
    }

    #[test]
    fn range_child_emits_from_to() {
        let kind = PartitionKind::Range {
            low: "'2020-01-01'".into(),
            high: "'2020-02-01'".into(),
        };
        let ddl = build_child_ddl("public", "events", "events_2020_01", &kind, "occurred_at");
        assert!(ddl.contains("FOR VALUES FROM ('2020-01-01') TO ('2020-02-01')"));
    }

    #[test]
    fn list_child_emits_in_clause() {
        let kind = PartitionKind::List {
            members: vec!["'A'".into(), "'B'".into()],
        };
        let ddl = build_child_ddl("public", "statuses", "statuses_0", &kind, "status");
        assert!(ddl.contains("FOR VALUES IN ('A', 'B')"));
    }

    #[test]
    fn swap_ddl_is_one_transaction() {
        let ddl = build_swap_ddl("public", "events", "public", "p_events");
        assert!(ddl.starts_with("BEGIN;"));
        assert!(ddl.contains("LOCK TABLE \"public\".\"events\";"));
        assert!(ddl.contains("RENAME TO \"__events\""));
        assert!(ddl.contains("RENAME TO \"events\""));
        assert!(ddl.trim_end().ends_with("COMMIT;"));
    }

    #[test]
    fn format_column_reattaches_length_and_precision_modifiers() {
        let varchar = Column {
            schema: "public".into(),
            table: "events".into(),
            name: "label".into(),
            data_type: "character varying".into(),
            character_maximum_length: Some(255),
            numeric_precision: None,
            numeric_scale: None,
            not_null: false,
            default: None,
        };
        assert_eq!(varchar.rendered_type(), "CHARACTER VARYING(255)");

        let numeric = Column {
            schema: "public".into(),
            table: "events".into(),
            name: "amount".into(),
            data_type: "numeric".into(),
            character_maximum_length: None,
            numeric_precision: Some(10),
            numeric_scale: Some(2),
            not_null: false,
            default: None,
        };
        assert_eq!(numeric.rendered_type(), "NUMERIC(10,2)");
    }

    #[test]
    fn child_and_parallel_naming_matches_convention() {
        assert_eq!(parallel_name("events"), "p_events");
        assert_eq!(renamed_source_name("events"), "__events");
        assert_eq!(child_name("events", "2020_01"), "events_2020_01");
    }
}
