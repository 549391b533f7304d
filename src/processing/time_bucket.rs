//! Day-bucketed sums.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::types::{Table, Value};

use super::group::GroupedTotals;
use super::resolve::{resolve_amount, resolve_value};
use super::{ChartPoint, DEFAULT_AMOUNT};

/// Bucket label for date values that cannot be interpreted.
pub const INVALID_DATE: &str = "Invalid Date";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Sum amounts per calendar day.
///
/// - Rows whose date candidates are all missing/null are skipped.
/// - The amount defaults to 1 when no numeric amount candidate is present.
/// - Buckets are labelled `M/D/YYYY` and returned in the order they are first seen in the rows
///   (not in time order), capped at `limit`.
///
/// ```rust
/// use tabular_dashboard::processing::{sum_by_time_bucket, ChartPoint};
/// use tabular_dashboard::types::{Table, Value};
///
/// let rows = Table::from_records(vec![
///     vec![("OrderDate", Value::from("2024-01-01")), ("TotalDue", Value::Int64(10))],
///     vec![("OrderDate", Value::from("2024-01-01")), ("TotalDue", Value::Int64(5))],
/// ]);
/// let out = sum_by_time_bucket(&rows, &["TotalDue"], &["OrderDate"], 20);
/// assert_eq!(out, vec![ChartPoint::new("1/1/2024", 15.0)]);
/// ```
pub fn sum_by_time_bucket(
    table: &Table,
    amount_candidates: &[&str],
    date_candidates: &[&str],
    limit: usize,
) -> Vec<ChartPoint> {
    let mut buckets = GroupedTotals::new();
    for record in table.records() {
        let Some(date) = resolve_value(&record, date_candidates) else {
            continue;
        };
        let amount = resolve_amount(&record, amount_candidates).unwrap_or(DEFAULT_AMOUNT);
        buckets.add(date_bucket_label(date), amount);
    }
    buckets.first(limit, None)
}

/// Day label (`M/D/YYYY`, no zero padding) for a date-like value.
///
/// Strings are parsed as ISO-8601/RFC 3339 or common US forms and keep their written calendar
/// day (no time zone shift). Numbers are epoch milliseconds. Anything else is
/// [`INVALID_DATE`].
pub fn date_bucket_label(value: &Value) -> String {
    let date = match value {
        Value::Utf8(s) => parse_date(s.trim()),
        Value::Int64(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.date_naive()),
        Value::Float64(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(ms.trunc() as i64).map(|dt| dt.date_naive())
        }
        _ => None,
    };

    match date {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
}
