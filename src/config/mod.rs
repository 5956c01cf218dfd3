//! Config Resolver: loads the partitioning configuration and resolves the
//! ordered directive list for a given schema.

mod sample;

pub use sample::generate_sample_config;

use crate::error::EngineError;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// One table's partitioning instructions, normalised from the raw
/// `partition_type`/nested-block config shape into a typed sum type.
#[derive(Debug, Clone)]
pub struct Directive {
    pub table: String,
    pub target_schema: Option<String>,
    pub partition_key: String,
    pub spec: PartitionSpec,
    pub drop_table: bool,
}

#[derive(Debug, Clone)]
pub enum PartitionSpec {
    Range { interval_type: String, interval: i64 },
    List { value_lists: Vec<Vec<String>> },
}

/// The resolved, read-only configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    partition_targets: BTreeMap<String, Vec<Directive>>,
    pub excluded_schemata: BTreeSet<String>,
}

impl Config {
    /// Returns the ordered directives configured for `schema`, falling back
    /// to the wildcard (`*`) entry, or an empty list if neither is present.
    pub fn targets_for(&self, schema: &str) -> &[Directive] {
        self.partition_targets
            .get(schema)
            .or_else(|| self.partition_targets.get("*"))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Loads and validates a configuration document from `path`. `.json` is
    /// parsed as JSON; any other extension (including `.yaml`/`.yml`, or
    /// none) is parsed as YAML, matching the original tool's YAML-only
    /// heritage.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidConfig(format!("reading {}: {e}", path.display())))?;

        let raw: RawConfig = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&contents)
                .map_err(|e| EngineError::InvalidConfig(format!("parsing JSON config: {e}")))?
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| EngineError::InvalidConfig(format!("parsing YAML config: {e}")))?
        };

        Self::try_from(raw)
    }

    fn try_from(raw: RawConfig) -> Result<Self, EngineError> {
        let mut partition_targets = BTreeMap::new();

        for (schema, entries) in raw.partition_targets {
            let mut directives = Vec::with_capacity(entries.len());
            for entry in entries {
                if entry.len() != 1 {
                    return Err(EngineError::InvalidConfig(format!(
                        "directive entry under schema '{schema}' must name exactly one table, got {}",
                        entry.len()
                    )));
                }
                let (table, body) = entry.into_iter().next().expect("checked len == 1");
                directives.push(body.into_directive(table)?);
            }
            partition_targets.insert(schema, directives);
        }

        Ok(Config {
            partition_targets,
            excluded_schemata: raw.excluded_schemata,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    partition_targets: BTreeMap<String, Vec<BTreeMap<String, RawDirectiveBody>>>,
    #[serde(default)]
    excluded_schemata: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct RawDirectiveBody {
    target_schema: Option<String>,
    partition_key: String,
    partition_type: String,
    range: Option<RawRangeBlock>,
    list: Option<RawListBlock>,
    #[serde(default)]
    drop_table: bool,
}

#[derive(Debug, Deserialize)]
struct RawRangeBlock {
    interval_type: String,
    interval: i64,
}

#[derive(Debug, Deserialize)]
struct RawListBlock {
    values: Vec<Vec<String>>,
}

impl RawDirectiveBody {
    fn into_directive(self, table: String) -> Result<Directive, EngineError> {
        let spec = match self.partition_type.as_str() {
            "range" => {
                let block = self.range.ok_or_else(|| {
                    EngineError::InvalidConfig(format!(
                        "table '{table}': partition_type is \"range\" but no 'range' block was given"
                    ))
                })?;
                PartitionSpec::Range {
                    interval_type: block.interval_type,
                    interval: block.interval,
                }
            }
            "list" => {
                let block = self.list.ok_or_else(|| {
                    EngineError::InvalidConfig(format!(
                        "table '{table}': partition_type is \"list\" but no 'list' block was given"
                    ))
                })?;
                PartitionSpec::List {
                    value_lists: block.values,
                }
            }
            other => {
                return Err(EngineError::InvalidConfig(format!(
                    "table '{table}': partition_type must be \"range\" or \"list\", got \"{other}\""
                )))
            }
        };

        if self.partition_key.is_empty() {
            return Err(EngineError::InvalidConfig(format!(
                "table '{table}': partition_key is required"
            )));
        }

        Ok(Directive {
            table,
            target_schema: self.target_schema,
            partition_key: self.partition_key,
            spec,
            drop_table: self.drop_table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Config, EngineError> {
        let raw: RawConfig = serde_yaml::from_str(yaml).expect("valid yaml shape");
        Config::try_from(raw)
    }

    #[test]
    fn targets_for_falls_back_to_wildcard() {
        let cfg = parse(
            r#"
partition_targets:
  "*":
    - events:
        partition_key: occurred_at
        partition_type: range
        range:
          interval_type: month
          interval: 1
"#,
        )
        .unwrap();

        assert_eq!(cfg.targets_for("any_schema").len(), 1);
        assert_eq!(cfg.targets_for("any_schema")[0].table, "events");
    }

    #[test]
    fn targets_for_unlisted_schema_without_wildcard_is_empty() {
        let cfg = parse(
            r#"
partition_targets:
  public:
    - events:
        partition_key: occurred_at
        partition_type: range
        range:
          interval_type: month
          interval: 1
"#,
        )
        .unwrap();

        assert!(cfg.targets_for("other").is_empty());
    }

    #[test]
    fn missing_partition_type_block_is_rejected() {
        let err = parse(
            r#"
partition_targets:
  public:
    - events:
        partition_key: occurred_at
        partition_type: range
"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn unknown_partition_type_is_rejected() {
        let err = parse(
            r#"
partition_targets:
  public:
    - events:
        partition_key: occurred_at
        partition_type: hash
"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn list_directive_parses() {
        let cfg = parse(
            r#"
partition_targets:
  public:
    - statuses:
        partition_key: status
        partition_type: list
        list:
          values:
            - ["A", "B"]
            - ["C"]
        drop_table: true
"#,
        )
        .unwrap();
        let directive = &cfg.targets_for("public")[0];
        assert!(directive.drop_table);
        match &directive.spec {
            PartitionSpec::List { value_lists } => {
                assert_eq!(value_lists.len(), 2);
            }
            _ => panic!("expected list spec"),
        }
    }
}
