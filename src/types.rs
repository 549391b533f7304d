//! Core data model types for ingestion.
//!
//! Uploaded files are parsed into an in-memory [`Table`]: an ordered list of column names plus
//! row-major [`Value`] storage. A [`Record`] is a borrowed view of one row that answers lookups
//! by column name, which is what the aggregation layer works against.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single dynamically typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value. Only [`Value::Int64`] and [`Value::Float64`] qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Render the value as a group/bucket label.
    ///
    /// Numbers print the way a JSON number would (`5`, not `5.0`), booleans as `true`/`false`,
    /// and `Null` as `null`.
    pub fn to_label(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => format_number(*v),
            Value::Bool(b) => b.to_string(),
            Value::Utf8(s) => s.clone(),
        }
    }
}

/// Prints integral floats without a fractional part, and magnitudes at or above `1e21` or
/// below `1e-6` in exponent form (`1e300`, `2.5e-7`).
pub(crate) fn format_number(v: f64) -> String {
    let abs = v.abs();
    if !v.is_finite() {
        v.to_string()
    } else if abs >= 1e21 || (abs != 0.0 && abs < 1e-6) {
        format!("{v:e}")
    } else if v.fract() == 0.0 {
        format!("{}", v as i128)
    } else {
        v.to_string()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Utf8(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Utf8(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            // JSON has no representation for NaN/inf.
            Value::Float64(v) if !v.is_finite() => serializer.serialize_none(),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

/// In-memory tabular data.
///
/// Rows are stored as `Vec<Vec<Value>>` aligned with [`Table::columns`]. Every row produced by
/// ingestion has exactly `columns.len()` cells; missing cells are [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from `(column, value)` pairs per row.
    ///
    /// Columns are taken from the first row in order; later rows are projected onto those
    /// columns and missing keys become [`Value::Null`]. Mostly useful for tests and fixtures.
    pub fn from_records<K, V, R, I>(records: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        R: IntoIterator<Item = (K, V)>,
        I: IntoIterator<Item = R>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for (i, record) in records.into_iter().enumerate() {
            let pairs: Vec<(String, Value)> = record
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            if i == 0 {
                columns = pairs.iter().map(|(k, _)| k.clone()).collect();
            }
            let row = columns
                .iter()
                .map(|c| {
                    pairs
                        .iter()
                        .find(|(k, _)| k == c)
                        .map(|(_, v)| v.clone())
                        .unwrap_or(Value::Null)
                })
                .collect();
            rows.push(row);
        }
        Self { columns, rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Borrowed view of the row at `idx`.
    pub fn record(&self, idx: usize) -> Option<Record<'_>> {
        self.rows.get(idx).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Iterate rows as [`Record`]s in order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            columns: &self.columns,
            values,
        })
    }
}

/// A borrowed row with name-based access.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Value of `column` in this row. `None` when the column does not exist.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let values = self.values;
        let columns = self.columns;
        columns
            .iter()
            .enumerate()
            .map(move |(i, c)| (c.as_str(), values.get(i).unwrap_or(&Value::Null)))
    }

    /// Number of keys in the record.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the record has no keys.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Serializes a table's rows as an array of objects keyed by column name.
pub(crate) struct RowsAsObjects<'a>(pub &'a Table);

impl Serialize for RowsAsObjects<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.row_count()))?;
        for record in self.0.records() {
            seq.serialize_element(&record)?;
        }
        seq.end()
    }
}
