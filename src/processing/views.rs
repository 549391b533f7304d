//! Fixed chart compositions for the dashboard and analytics pages.
//!
//! These wire the aggregation functions to the column names found in typical sales and
//! purchasing exports (AdventureWorks-style `TotalDue`, `TerritoryID`, `OrderDate`, ...).

use serde::Serialize;

use crate::types::Table;

use super::group::{count_by_group, sum_by_group, top_group_by_count};
use super::time_bucket::sum_by_time_bucket;
use super::totals::{leading_rows_series, total_and_average};
use super::{ChartPoint, OTHER_GROUP, UNKNOWN_GROUP};

/// Every amount-like column, summed together for the sales total.
pub const SALES_FIELDS: &[&str] = &["TotalDue", "SubTotal", "LineTotal", "OrderQty"];
/// Amount candidates for per-row and per-group values.
pub const AMOUNT_FIELDS: &[&str] = &["TotalDue", "SubTotal", "LineTotal"];
/// Group candidates for per-territory sums and the top territory.
pub const TERRITORY_FIELDS: &[&str] = &["TerritoryID", "Territory", "Name"];
/// Group candidates for the dashboard pie chart.
pub const STATUS_FIELDS: &[&str] = &["Status", "ShipMethodID", "Type"];
/// Group candidates for the analytics pie chart.
pub const CATEGORY_FIELDS: &[&str] = &["ProductCategory", "Category", "Type", "Status"];
/// Date candidates for daily buckets.
pub const DATE_FIELDS: &[&str] = &["OrderDate", "ModifiedDate", "Date"];
/// Label candidates for the dashboard trend line.
pub const TREND_LABEL_FIELDS: &[&str] = &["Name", "OrderDate"];

/// Fallback status for the dashboard pie chart.
pub const ACTIVE_STATUS: &str = "Active";

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Sum of every sales-like column over all rows.
    pub total_sales: f64,
    /// Number of rows.
    pub order_count: usize,
    /// `total_sales / order_count`, or 0 for an empty dataset.
    pub avg_order_value: f64,
    /// Territory with the most rows, or `N/A`.
    pub top_territory: String,
}

/// Everything the dashboard page draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Headline numbers.
    pub metrics: DashboardMetrics,
    /// First 10 rows as a trend line.
    pub line_data: Vec<ChartPoint>,
    /// Sales per territory, first 8 seen, labels cut at 15 characters.
    pub bar_data: Vec<ChartPoint>,
    /// Rows per status, first 5 seen.
    pub pie_data: Vec<ChartPoint>,
}

impl DashboardView {
    /// Build every dashboard series from `table`.
    pub fn compute(table: &Table) -> Self {
        let totals = total_and_average(table, SALES_FIELDS);
        let metrics = DashboardMetrics {
            total_sales: totals.total,
            order_count: totals.count,
            avg_order_value: totals.average,
            top_territory: top_group_by_count(table, TERRITORY_FIELDS),
        };

        Self {
            metrics,
            line_data: leading_rows_series(table, TREND_LABEL_FIELDS, AMOUNT_FIELDS, 10),
            bar_data: sum_by_group(table, AMOUNT_FIELDS, TERRITORY_FIELDS, UNKNOWN_GROUP).first(8, Some(15)),
            pie_data: count_by_group(table, STATUS_FIELDS, ACTIVE_STATUS, 5),
        }
    }
}

/// Everything the analytics page draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    /// Daily sums, first 20 days seen.
    pub line_data: Vec<ChartPoint>,
    /// Sales per territory, first 10 seen, labels cut at 20 characters.
    pub bar_data: Vec<ChartPoint>,
    /// Rows per category, first 6 seen.
    pub pie_data: Vec<ChartPoint>,
    /// Top 8 territories by sales, labels cut at 15 characters.
    pub territory_data: Vec<ChartPoint>,
}

impl AnalyticsView {
    /// Build every analytics series from `table`.
    pub fn compute(table: &Table) -> Self {
        let territories = sum_by_group(table, AMOUNT_FIELDS, TERRITORY_FIELDS, UNKNOWN_GROUP);

        Self {
            line_data: sum_by_time_bucket(table, AMOUNT_FIELDS, DATE_FIELDS, 20),
            bar_data: territories.first(10, Some(20)),
            pie_data: count_by_group(table, CATEGORY_FIELDS, OTHER_GROUP, 6),
            territory_data: territories.top(8, Some(15)),
        }
    }
}
