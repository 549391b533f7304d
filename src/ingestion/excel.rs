#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{NaiveDateTime, Timelike};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Table, Value};

use super::normalize::table_from_grid;

/// Largest float that still round-trips exactly through `i64`.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Parse an in-memory Excel document (`.xlsx`, `.xls`, ...) into a [`Table`].
///
/// Behavior:
/// - The container format is sniffed from the bytes, not the file name
/// - Only the first sheet in the workbook is read
/// - The first non-empty row is the header row
/// - Remaining rows are converted cell by cell into [`Value`]s
pub fn parse_workbook(bytes: &[u8]) -> IngestionResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            return Err(IngestionError::ParseFailure {
                message: "workbook has no sheets".to_string(),
            });
        }
    };

    Ok(table_from_range(&range))
}

fn table_from_range(range: &calamine::Range<Data>) -> Table {
    let grid = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    table_from_grid(grid)
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Value::Utf8(format_datetime(ndt)),
            None => float_value(dt.as_f64()),
        },
        Data::DateTimeIso(s) => Value::Utf8(s.clone()),
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(e) => Value::Utf8(e.to_string()),
    }
}

/// Whole-number floats (the usual storage for spreadsheet integers) become `Int64`.
fn float_value(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INT {
        Value::Int64(f as i64)
    } else {
        Value::Float64(f)
    }
}

fn format_datetime(ndt: NaiveDateTime) -> String {
    if ndt.num_seconds_from_midnight() == 0 {
        ndt.format("%Y-%m-%d").to_string()
    } else {
        ndt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
