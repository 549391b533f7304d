//! Whole-table totals and per-row series.

use serde::Serialize;

use crate::types::{Table, Value};

use super::resolve::{resolve_amount, resolve_label};
use super::ChartPoint;

/// Result of [`total_and_average`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of every numeric candidate value.
    pub total: f64,
    /// Number of rows, including rows without amounts.
    pub count: usize,
    /// `total / count`, or 0 when there are no rows.
    pub average: f64,
}

/// Sum of every numeric amount candidate in every row, the row count, and their ratio.
///
/// Unlike the other aggregations this does not stop at the first matching candidate: a row with
/// both `TotalDue` and `SubTotal` contributes both. The average is 0 for an empty table.
pub fn total_and_average(table: &Table, amount_candidates: &[&str]) -> Totals {
    let total: f64 = table
        .records()
        .map(|record| {
            amount_candidates
                .iter()
                .filter_map(|c| record.get(c))
                .filter_map(Value::as_f64)
                .filter(|v| v.is_finite())
                .sum::<f64>()
        })
        .sum();
    let count = table.row_count();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    Totals {
        total,
        count,
        average,
    }
}

/// One point per leading row: label from `label_candidates` (or `Item {n}`, 1-based) and the
/// first numeric amount (or 0).
pub fn leading_rows_series(
    table: &Table,
    label_candidates: &[&str],
    amount_candidates: &[&str],
    limit: usize,
) -> Vec<ChartPoint> {
    table
        .records()
        .take(limit)
        .enumerate()
        .map(|(i, record)| ChartPoint {
            name: resolve_label(&record, label_candidates).unwrap_or_else(|| format!("Item {}", i + 1)),
            value: resolve_amount(&record, amount_candidates).unwrap_or(0.0),
        })
        .collect()
}
