//! Core data types shared by the catalog inspector, planner, and DDL emitter.

use crate::config::Directive;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A single column as reported by the system catalogs, in catalog attribute order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub schema: String,
    pub table: String,
    pub name: String,
    /// Canonical data type string as returned by the catalog (e.g. `"integer"`, `"timestamp with time zone"`).
    pub data_type: String,
    /// `character_maximum_length` for `character varying`/`character`, otherwise `None`.
    pub character_maximum_length: Option<i32>,
    /// `numeric_precision`/`numeric_scale` for `numeric`, otherwise `None`.
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub not_null: bool,
    pub default: Option<String>,
}

impl Column {
    /// The DDL-ready rendering of this column's type, with length/precision
    /// modifiers reattached where the base type carries them.
    pub fn rendered_type(&self) -> String {
        let base = self.data_type.to_uppercase();
        match self.data_type.as_str() {
            "character varying" | "character" => match self.character_maximum_length {
                Some(len) => format!("{base}({len})"),
                None => base,
            },
            "numeric" => match (self.numeric_precision, self.numeric_scale) {
                (Some(p), Some(s)) => format!("{base}({p},{s})"),
                (Some(p), None) => format!("{base}({p})"),
                _ => base,
            },
            _ => base,
        }
    }
}

/// Column shape of a source table paired with the directive that targets it.
#[derive(Debug, Clone)]
pub struct TableInfo {
    pub columns: Vec<Column>,
    pub directive: Directive,
}

impl TableInfo {
    pub fn table_name(&self) -> &str {
        &self.directive.table
    }

    /// The catalog data type of the configured partition column.
    ///
    /// Returns `None` if the partition key does not name a real column --
    /// callers treat this as a config error, not a silent default.
    pub fn partition_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == self.directive.partition_key)
    }
}

/// The kind of partition a child table was created as, independent of how the
/// bound values are represented textually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionKind {
    /// Half-open `[low, high)` range.
    Range { low: String, high: String },
    List { members: Vec<String> },
    Default,
}

impl PartitionKind {
    pub fn type_tag(&self) -> &'static str {
        match self {
            PartitionKind::Range { .. } => "range",
            PartitionKind::List { .. } => "list",
            PartitionKind::Default => "default",
        }
    }

    /// The structured `partition_parameters` blob recorded in the ledger.
    pub fn parameters(&self) -> serde_json::Value {
        match self {
            PartitionKind::Default => json!({ "default": true }),
            PartitionKind::Range { low, high } => json!({
                "from": low,
                "to": high,
                "default": false,
            }),
            PartitionKind::List { members } => json!({
                "in": members,
                "default": false,
            }),
        }
    }
}

/// One row recorded in the `partitioned_tables` tracking table per child partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub schema_name: String,
    pub table_name: String,
    pub partition_of_table_name: String,
    pub partition_type: String,
    pub partition_col: String,
    pub partition_parameters: serde_json::Value,
}

impl LedgerRecord {
    pub fn new(schema: &str, child: &str, parent: &str, col: &str, kind: &PartitionKind) -> Self {
        LedgerRecord {
            schema_name: schema.to_string(),
            table_name: child.to_string(),
            partition_of_table_name: parent.to_string(),
            partition_type: kind.type_tag().to_string(),
            partition_col: col.to_string(),
            partition_parameters: kind.parameters(),
        }
    }
}

/// Returns true if the catalog type string names a date or timestamp column.
pub fn is_temporal_type(data_type: &str) -> bool {
    matches!(
        data_type,
        "date" | "timestamp without time zone" | "timestamp with time zone" | "timestamptz" | "timestamp"
    )
}

/// Returns true if the catalog type string carries a time zone.
pub fn is_timestamptz_type(data_type: &str) -> bool {
    matches!(data_type, "timestamp with time zone" | "timestamptz")
}
