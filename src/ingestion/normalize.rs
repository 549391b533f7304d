//! Shared grid → [`Table`] normalization used by every format.
//!
//! Format readers only turn bytes into a grid of coerced [`Value`]s. This module applies the
//! common rules on top: blank rows are dropped, the first remaining row becomes the header,
//! header names are made unique, and every data row is padded to the header width.

use std::collections::HashSet;

use crate::types::{format_number, Table, Value};

/// Name given to header cells that are blank.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Build a [`Table`] from a raw grid whose first non-blank row is the header.
///
/// Returns an empty table (no columns, no rows) when there is no data row below the header.
pub(crate) fn table_from_grid(grid: Vec<Vec<Value>>) -> Table {
    let mut rows = grid
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.is_null()));

    let Some(header) = rows.next() else {
        return Table::default();
    };
    let body: Vec<Vec<Value>> = rows.collect();
    if body.is_empty() {
        return Table::default();
    }

    // Width is the right-most non-blank cell across header and data rows.
    let width = std::iter::once(&header)
        .chain(body.iter())
        .map(|row| row.iter().rposition(|c| !c.is_null()).map_or(0, |i| i + 1))
        .max()
        .unwrap_or(0);

    let columns = header_names(&header, width);
    let rows = body
        .into_iter()
        .map(|mut row| {
            row.resize(width, Value::Null);
            row
        })
        .collect();

    Table::new(columns, rows)
}

fn header_names(header: &[Value], width: usize) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(width);
    let mut names = Vec::with_capacity(width);

    for idx in 0..width {
        let base = match header.get(idx) {
            Some(v) if !v.is_null() => header_label(v),
            _ => EMPTY_HEADER.to_string(),
        };

        let mut name = base.clone();
        let mut n = 1usize;
        while used.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        used.insert(name.clone());
        names.push(name);
    }

    names
}

fn header_label(v: &Value) -> String {
    match v {
        Value::Float64(f) => format_number(*f),
        other => other.to_label(),
    }
}

/// Coerce one cell of delimited text.
///
/// - blank (after trimming) → `Null`
/// - decimal literal → `Int64` when it fits, otherwise `Float64`
/// - `true`/`false` in any case → `Bool`
/// - anything else → the raw text
pub(crate) fn coerce_text(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    if looks_numeric(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int64(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Value::Float64(f);
            }
        }
    }

    if trimmed.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::Utf8(raw.to_string())
    }
}

/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]` with at least one mantissa digit.
///
/// `str::parse::<f64>` alone would also accept `inf`, `NaN` and `infinity`.
fn looks_numeric(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let mut mantissa_digits = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == b.len()
}
