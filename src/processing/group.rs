//! Grouped sums and counts.

use std::collections::HashMap;

use crate::types::Table;

use super::resolve::{resolve_amount, resolve_label};
use super::{ChartPoint, DEFAULT_AMOUNT, NOT_AVAILABLE};

/// Suffix appended to labels cut by [`truncate_label`].
pub const ELLIPSIS: &str = "...";

/// Per-group totals in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedTotals {
    index: HashMap<String, usize>,
    entries: Vec<(String, f64)>,
}

impl GroupedTotals {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `key`, registering the key on first sight.
    pub fn add(&mut self, key: String, amount: f64) {
        match self.index.get(&key) {
            Some(&idx) => self.entries[idx].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    /// Total for `key`, if seen.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&idx| self.entries[idx].1)
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no group has been seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(group, total)` in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The first `limit` groups in encounter order.
    ///
    /// Not a ranking: on large inputs this keeps whichever groups appeared first.
    pub fn first(&self, limit: usize, label_limit: Option<usize>) -> Vec<ChartPoint> {
        self.entries
            .iter()
            .take(limit)
            .map(|(k, v)| point(k, *v, label_limit))
            .collect()
    }

    /// The `limit` largest groups, descending. Ties keep encounter order.
    pub fn top(&self, limit: usize, label_limit: Option<usize>) -> Vec<ChartPoint> {
        let mut sorted: Vec<&(String, f64)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        sorted
            .into_iter()
            .take(limit)
            .map(|(k, v)| point(k, *v, label_limit))
            .collect()
    }
}

fn point(name: &str, value: f64, label_limit: Option<usize>) -> ChartPoint {
    let name = match label_limit {
        Some(max) => truncate_label(name, max),
        None => name.to_string(),
    };
    ChartPoint { name, value }
}

/// Cut `label` to `max` characters and append [`ELLIPSIS`] when it is longer than that.
pub fn truncate_label(label: &str, max: usize) -> String {
    match label.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &label[..cut]),
        None => label.to_string(),
    }
}

/// Sum the resolved amount (default 1) per resolved group (default `default_group`).
pub fn sum_by_group(
    table: &Table,
    amount_candidates: &[&str],
    group_candidates: &[&str],
    default_group: &str,
) -> GroupedTotals {
    let mut totals = GroupedTotals::new();
    for record in table.records() {
        let group = resolve_label(&record, group_candidates).unwrap_or_else(|| default_group.to_string());
        let amount = resolve_amount(&record, amount_candidates).unwrap_or(DEFAULT_AMOUNT);
        totals.add(group, amount);
    }
    totals
}

/// Row count per resolved group.
///
/// With `default_group = None`, rows without a resolvable group are not counted.
pub fn group_counts(table: &Table, group_candidates: &[&str], default_group: Option<&str>) -> GroupedTotals {
    let mut counts = GroupedTotals::new();
    for record in table.records() {
        let group = match (resolve_label(&record, group_candidates), default_group) {
            (Some(g), _) => g,
            (None, Some(d)) => d.to_string(),
            (None, None) => continue,
        };
        counts.add(group, 1.0);
    }
    counts
}

/// Row count per group, first `limit` groups in encounter order.
pub fn count_by_group(
    table: &Table,
    group_candidates: &[&str],
    default_group: &str,
    limit: usize,
) -> Vec<ChartPoint> {
    group_counts(table, group_candidates, Some(default_group)).first(limit, None)
}

/// The group with the most rows, or `"N/A"` when no row has a group.
pub fn top_group_by_count(table: &Table, group_candidates: &[&str]) -> String {
    group_counts(table, group_candidates, None)
        .top(1, None)
        .into_iter()
        .next()
        .map(|p| p.name)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
