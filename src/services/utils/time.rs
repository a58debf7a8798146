use crate::types::report::MonthlyCount;
use chrono::{DateTime, Timelike, Utc};
use std::collections::BTreeMap;

fn utc(timestamp: i64) -> Option<DateTime<Utc>> {
    if timestamp <= 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(timestamp, 0)
}

/// `YYYY-MM` of an epoch-seconds timestamp. Zero means "absent".
pub fn month_key(timestamp: i64) -> Option<String> {
    utc(timestamp).map(|dt| dt.format("%Y-%m").to_string())
}

pub fn hour_of_day(timestamp: i64) -> Option<usize> {
    utc(timestamp).map(|dt| dt.hour() as usize)
}

/// Epoch seconds of an RFC 3339 string, `0` when it does not parse.
pub fn parse_rfc3339(text: &str) -> i64 {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.timestamp())
        .unwrap_or(0)
}

/// Chronological per-month counts, absent timestamps skipped.
pub fn monthly_series<I>(timestamps: I) -> Vec<MonthlyCount>
where
    I: IntoIterator<Item = i64>,
{
    let mut months: BTreeMap<String, u64> = BTreeMap::new();
    for month in timestamps.into_iter().filter_map(month_key) {
        *months.entry(month).or_insert(0) += 1;
    }
    months
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

#[cfg(test)]
#[path = "tests/time_tests.rs"]
mod tests;
