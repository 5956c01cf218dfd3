//! Partition Planner: turns a bounds pair and an interval spec into the
//! ordered sequence of child partition ranges, or passes a list spec through
//! unchanged.

use crate::error::EngineError;
use crate::value::PartitionValue;
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Month,
    Year,
}

impl FromStr for DateUnit {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(DateUnit::Month),
            "year" => Ok(DateUnit::Year),
            other => Err(EngineError::InvalidInterval {
                interval_type: other.to_string(),
            }),
        }
    }
}

/// Shifts `d` forward by `months` calendar months and truncates to day 1,
/// without passing through an intermediate (possibly invalid) day-of-month.
pub fn add_months_to_first(d: NaiveDate, months: i64) -> NaiveDate {
    let total = d.year() as i64 * 12 + (d.month() as i64 - 1) + months;
    let year = total.div_euclid(12) as i32;
    let month = (total.rem_euclid(12) + 1) as u32;
    NaiveDate::from_ymd_opt(year, month, 1).expect("computed year/month always valid")
}

/// Snaps `d` down to the first day of its containing month or year.
pub fn floor_date(d: NaiveDate, unit: DateUnit) -> NaiveDate {
    match unit {
        DateUnit::Month => add_months_to_first(d, 0),
        DateUnit::Year => NaiveDate::from_ymd_opt(d.year(), 1, 1).expect("valid"),
    }
}

/// Advances `d` to the first day of the *next* month or year period, regardless
/// of where within the current period `d` falls.
pub fn ceil_date(d: NaiveDate, unit: DateUnit) -> NaiveDate {
    match unit {
        DateUnit::Month => add_months_to_first(d, 1),
        DateUnit::Year => NaiveDate::from_ymd_opt(d.year() + 1, 1, 1).expect("valid"),
    }
}

/// Floors a partition-key value for use as the lower range bound. Numeric
/// values pass through unchanged; dates/timestamps collapse to their date
/// component first (never the original's no-argument `.date()` call).
pub fn floor_value(value: &PartitionValue, interval_type: &str) -> Result<PartitionValue, EngineError> {
    match value {
        PartitionValue::Numeric(n) => Ok(PartitionValue::Numeric(n.clone())),
        PartitionValue::Date(d) => {
            let unit = interval_type.parse()?;
            Ok(PartitionValue::Date(floor_date(*d, unit)))
        }
        PartitionValue::Timestamp(dt) => {
            let unit = interval_type.parse()?;
            Ok(PartitionValue::Timestamp(
                floor_date(dt.date(), unit)
                    .and_hms_opt(0, 0, 0)
                    .expect("valid time"),
            ))
        }
        PartitionValue::TimestampTz(dt) => {
            let unit = interval_type.parse()?;
            let floored = floor_date(dt.date_naive(), unit);
            Ok(PartitionValue::TimestampTz(
                chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(
                    floored.and_hms_opt(0, 0, 0).expect("valid time"),
                    chrono::Utc,
                ),
            ))
        }
    }
}

/// Ceils a partition-key value for use as the upper range bound. Numerics add
/// one (decimal-aware); dates/timestamps advance to the start of the next period.
pub fn ceil_value(value: &PartitionValue, interval_type: &str) -> Result<PartitionValue, EngineError> {
    match value {
        PartitionValue::Numeric(n) => Ok(PartitionValue::Numeric(n + BigDecimal::from(1))),
        PartitionValue::Date(d) => {
            let unit = interval_type.parse()?;
            Ok(PartitionValue::Date(ceil_date(*d, unit)))
        }
        PartitionValue::Timestamp(dt) => {
            let unit = interval_type.parse()?;
            Ok(PartitionValue::Timestamp(
                ceil_date(dt.date(), unit).and_hms_opt(0, 0, 0).expect("valid time"),
            ))
        }
        PartitionValue::TimestampTz(dt) => {
            let unit = interval_type.parse()?;
            let ceiled = ceil_date(dt.date_naive(), unit);
            Ok(PartitionValue::TimestampTz(
                chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(
                    ceiled.and_hms_opt(0, 0, 0).expect("valid time"),
                    chrono::Utc,
                ),
            ))
        }
    }
}

/// Advances a value by one interval step, the core move of [`plan_range`].
fn step(value: &PartitionValue, interval_type: &str, interval: i64) -> Result<PartitionValue, EngineError> {
    match value {
        PartitionValue::Numeric(n) => Ok(PartitionValue::Numeric(n + BigDecimal::from(interval))),
        PartitionValue::Date(d) => {
            let unit = interval_type.parse()?;
            let months = match unit {
                DateUnit::Month => interval,
                DateUnit::Year => interval * 12,
            };
            Ok(PartitionValue::Date(add_months_to_first(*d, months)))
        }
        PartitionValue::Timestamp(dt) => {
            let unit = interval_type.parse()?;
            let months = match unit {
                DateUnit::Month => interval,
                DateUnit::Year => interval * 12,
            };
            Ok(PartitionValue::Timestamp(
                add_months_to_first(dt.date(), months)
                    .and_hms_opt(0, 0, 0)
                    .expect("valid time"),
            ))
        }
        PartitionValue::TimestampTz(dt) => {
            let unit = interval_type.parse()?;
            let months = match unit {
                DateUnit::Month => interval,
                DateUnit::Year => interval * 12,
            };
            let advanced = add_months_to_first(dt.date_naive(), months);
            Ok(PartitionValue::TimestampTz(
                chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(
                    advanced.and_hms_opt(0, 0, 0).expect("valid time"),
                    chrono::Utc,
                ),
            ))
        }
    }
}

/// Produces the half-open `(start, end)` pairs covering `[low, high]`.
///
/// Faithfully ports the original generator's loop shape: the `while` guard
/// re-checks the value that was current *before* the current iteration's
/// advance, which is what produces the documented one-interval overshoot past
/// `high` rather than stopping exactly at it.
pub fn plan_range(
    low: PartitionValue,
    high: PartitionValue,
    interval_type: &str,
    interval: i64,
) -> Result<Vec<(PartitionValue, PartitionValue)>, EngineError> {
    let mut start = low.clone();
    let mut end = low;
    let mut out = Vec::new();

    while start < high {
        start = end.clone();
        end = step(&start, interval_type, interval)?;
        out.push((start.clone(), end.clone()));
    }

    Ok(out)
}

/// Passes the configured list-of-lists through unchanged; each inner list
/// becomes one child partition's membership set.
pub fn plan_list(value_lists: Vec<Vec<String>>) -> Vec<Vec<String>> {
    value_lists
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> PartitionValue {
        PartitionValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn monthly_range_overshoots_by_one() {
        let low = floor_value(&date(2020, 1, 15), "month").unwrap();
        let high = ceil_value(&date(2020, 3, 10), "month").unwrap();
        let ranges = plan_range(low, high, "month", 1).unwrap();
        let suffixes: Vec<String> = ranges
            .iter()
            .map(|(lo, _)| lo.name_suffix("month"))
            .collect();
        assert_eq!(suffixes, vec!["2020_01", "2020_02", "2020_03", "2020_04"]);
    }

    #[test]
    fn yearly_range_over_integers() {
        let low = PartitionValue::Numeric(BigDecimal::from(2018));
        let high = ceil_value(&PartitionValue::Numeric(BigDecimal::from(2021)), "year").unwrap();
        let ranges = plan_range(low, high, "year", 1).unwrap();
        let suffixes: Vec<String> = ranges.iter().map(|(lo, _)| lo.name_suffix("year")).collect();
        assert_eq!(suffixes, vec!["2018", "2019", "2020", "2021", "2022"]);
    }

    #[test]
    fn floor_ceil_roundtrip() {
        for unit in [DateUnit::Month, DateUnit::Year] {
            let d = NaiveDate::from_ymd_opt(2023, 7, 19).unwrap();
            let ceiled = ceil_date(d, unit);
            assert_eq!(floor_date(ceiled, unit), ceiled);
        }
    }

    #[test]
    fn invalid_interval_type_rejected() {
        let low = date(2020, 1, 1);
        let high = date(2020, 2, 1);
        let err = plan_range(low, high, "fortnight", 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInterval { .. }));
    }

    #[test]
    fn list_plan_passes_through() {
        let lists = vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string()]];
        assert_eq!(plan_list(lists.clone()), lists);
    }
}
