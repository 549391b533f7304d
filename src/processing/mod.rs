//! Aggregations over ingested tables.
//!
//! Everything here is a pure, total function of a [`crate::types::Table`]: absent or null
//! fields fall through to defaults instead of failing, and the same rows always give the same
//! output.
//!
//! Currently implemented:
//!
//! - [`resolve`]: candidate-field lookup shared by every aggregation
//! - [`sum_by_time_bucket()`]: daily sums
//! - [`sum_by_group()`], [`count_by_group()`], [`top_group_by_count()`]: grouped sums/counts
//! - [`total_and_average()`], [`leading_rows_series()`]: whole-table totals and per-row series
//! - [`views`]: the dashboard and analytics chart compositions
//!
//! ## Example
//!
//! ```rust
//! use tabular_dashboard::processing::{count_by_group, total_and_average, ChartPoint};
//! use tabular_dashboard::types::{Table, Value};
//!
//! let rows = Table::from_records(vec![
//!     vec![("Status", Value::from("A")), ("TotalDue", Value::Int64(10))],
//!     vec![("Status", Value::from("A")), ("TotalDue", Value::Int64(4))],
//!     vec![("Status", Value::from("B")), ("TotalDue", Value::Null)],
//! ]);
//!
//! let pie = count_by_group(&rows, &["Status"], "Other", 5);
//! assert_eq!(pie, vec![ChartPoint::new("A", 2.0), ChartPoint::new("B", 1.0)]);
//!
//! let totals = total_and_average(&rows, &["TotalDue"]);
//! assert_eq!(totals.total, 14.0);
//! assert_eq!(totals.count, 3);
//! ```

use serde::Serialize;

pub mod group;
pub mod resolve;
pub mod time_bucket;
pub mod totals;
pub mod views;

pub use group::{count_by_group, group_counts, sum_by_group, top_group_by_count, truncate_label, GroupedTotals};
pub use time_bucket::{date_bucket_label, sum_by_time_bucket};
pub use totals::{leading_rows_series, total_and_average, Totals};
pub use views::{AnalyticsView, DashboardMetrics, DashboardView};

/// Amount used when a row has no numeric amount candidate.
pub const DEFAULT_AMOUNT: f64 = 1.0;
/// Default group for grouped sums.
pub const UNKNOWN_GROUP: &str = "Unknown";
/// Default group for category counts.
pub const OTHER_GROUP: &str = "Other";
/// Returned by [`top_group_by_count`] when no row has a group.
pub const NOT_AVAILABLE: &str = "N/A";

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Axis or slice label.
    pub name: String,
    /// Summed amount or row count.
    pub value: f64,
}

impl ChartPoint {
    /// Create a point from a label and a value.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
