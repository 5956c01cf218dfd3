//! Partition-key value representation shared by the bounds prober, planner,
//! and DDL emitter.
//!
//! The original tool let the database driver hand back native Python types
//! and relied on duck typing to tell a date from an int. Here the catalog
//! type string is consulted once, in the bounds prober, to produce one of
//! these variants; everything downstream matches on the variant instead of
//! re-inspecting strings.

use crate::error::EngineError;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionValue {
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Numeric(BigDecimal),
}

impl PartitionValue {
    /// Parses a value cast to `text` by the database into the variant implied
    /// by `data_type`.
    pub fn parse(data_type: &str, text: &str) -> Result<Self, EngineError> {
        match data_type {
            "date" => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(PartitionValue::Date)
                .map_err(|e| EngineError::Catalog(format!("bad date literal '{text}': {e}"))),
            "timestamp without time zone" | "timestamp" => {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
                    .map(PartitionValue::Timestamp)
                    .map_err(|e| {
                        EngineError::Catalog(format!("bad timestamp literal '{text}': {e}"))
                    })
            }
            "timestamp with time zone" | "timestamptz" => {
                DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z")
                    .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%#z"))
                    .map(|dt| PartitionValue::TimestampTz(dt.with_timezone(&Utc)))
                    .map_err(|e| {
                        EngineError::Catalog(format!("bad timestamptz literal '{text}': {e}"))
                    })
            }
            _ => BigDecimal::from_str(text.trim())
                .map(PartitionValue::Numeric)
                .map_err(|e| EngineError::Catalog(format!("bad numeric literal '{text}': {e}"))),
        }
    }

    /// UTC-midnight fallback for an empty temporal column, `months` months offset from today.
    pub fn temporal_default(data_type: &str, today: NaiveDate, months_offset: i64) -> Option<Self> {
        let shifted = crate::planner::add_months_to_first(today, months_offset);
        match data_type {
            "date" => Some(PartitionValue::Date(shifted)),
            "timestamp without time zone" | "timestamp" => Some(PartitionValue::Timestamp(
                shifted.and_time(NaiveTime::MIN),
            )),
            "timestamp with time zone" | "timestamptz" => Some(PartitionValue::TimestampTz(
                DateTime::<Utc>::from_naive_utc_and_offset(
                    shifted.and_time(NaiveTime::MIN),
                    Utc,
                ),
            )),
            _ => None,
        }
    }

    /// The SQL literal this value should be bound/rendered as in generated DDL.
    pub fn sql_literal(&self) -> String {
        match self {
            PartitionValue::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            PartitionValue::Timestamp(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
            PartitionValue::TimestampTz(dt) => {
                format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S+00"))
            }
            PartitionValue::Numeric(n) => n.to_string(),
        }
    }

    /// Name fragment used to build a child partition's table name.
    pub fn name_suffix(&self, interval_type: &str) -> String {
        match self {
            PartitionValue::Date(d) => date_suffix(*d, interval_type),
            PartitionValue::Timestamp(dt) => date_suffix(dt.date(), interval_type),
            PartitionValue::TimestampTz(dt) => date_suffix(dt.date_naive(), interval_type),
            PartitionValue::Numeric(n) => n.to_string(),
        }
    }
}

fn date_suffix(d: NaiveDate, interval_type: &str) -> String {
    use chrono::Datelike;
    if interval_type == "month" {
        format!("{:04}_{:02}", d.year(), d.month())
    } else {
        format!("{}", d.year())
    }
}

impl PartialOrd for PartitionValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (PartitionValue::Date(a), PartitionValue::Date(b)) => a.partial_cmp(b),
            (PartitionValue::Timestamp(a), PartitionValue::Timestamp(b)) => a.partial_cmp(b),
            (PartitionValue::TimestampTz(a), PartitionValue::TimestampTz(b)) => a.partial_cmp(b),
            (PartitionValue::Numeric(a), PartitionValue::Numeric(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}
