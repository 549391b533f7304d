//! Field resolution against loosely named records.
//!
//! Business files name the same quantity differently (`TotalDue`, `SubTotal`, `LineTotal`...).
//! Each logical quantity is therefore looked up through an ordered list of candidate column
//! names; the first candidate that is present and usable wins, otherwise the caller applies a
//! default.

use crate::types::{Record, Value};

/// First candidate that is present and non-null.
pub fn resolve_value<'a>(record: &Record<'a>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|c| record.get(c))
        .find(|v| !v.is_null())
}

/// First candidate holding a number.
///
/// Non-numeric values (strings, booleans) are skipped rather than coerced.
pub fn resolve_amount(record: &Record<'_>, candidates: &[&str]) -> Option<f64> {
    candidates
        .iter()
        .filter_map(|c| record.get(c))
        .find_map(Value::as_f64)
}

/// [`resolve_value`] rendered as a label.
pub fn resolve_label(record: &Record<'_>, candidates: &[&str]) -> Option<String> {
    resolve_value(record, candidates).map(Value::to_label)
}
