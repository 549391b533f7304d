//! In-memory dataset store.
//!
//! [`DatasetStore`] is constructed once (usually at process start), shared behind an `Arc`, and
//! dropped at shutdown. Each operation takes the lock exactly once; there are no multi-call
//! transactions. Stored datasets are immutable and handed out as `Arc<Dataset>`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::types::{RowsAsObjects, Table};

/// Opaque dataset identifier.
pub type DatasetId = Uuid;

/// Input to [`DatasetStore::create`]: everything except the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataset {
    /// Original file name.
    pub name: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Parsed columns and rows.
    pub table: Table,
}

impl NewDataset {
    /// Build the input for a freshly parsed table, deriving the counts and stamping `now`.
    pub fn from_table(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            uploaded_at: Utc::now(),
            row_count: table.row_count(),
            column_count: table.column_count(),
            table,
        }
    }
}

/// A stored dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Random id assigned by the store.
    pub id: DatasetId,
    /// Original file name.
    pub name: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Parsed columns and rows.
    pub table: Table,
}

impl Dataset {
    fn from_new(id: DatasetId, input: NewDataset) -> Self {
        Self {
            id,
            name: input.name,
            uploaded_at: input.uploaded_at,
            row_count: input.row_count,
            column_count: input.column_count,
            table: input.table,
        }
    }

    /// Listing projection of this dataset.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            id: self.id,
            name: self.name.clone(),
            uploaded_at: self.uploaded_at,
            row_count: self.row_count,
            column_count: self.column_count,
        }
    }
}

// Rows go out as objects keyed by column name under `data`.
impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Dataset", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("uploadedAt", &self.uploaded_at)?;
        s.serialize_field("rowCount", &self.row_count)?;
        s.serialize_field("columnCount", &self.column_count)?;
        s.serialize_field("columns", &self.table.columns)?;
        s.serialize_field("data", &RowsAsObjects(&self.table))?;
        s.end()
    }
}

/// A dataset without its columns and rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Dataset id.
    pub id: DatasetId,
    /// Original file name.
    pub name: String,
    /// Upload timestamp (`uploadedAt` on the wire).
    pub uploaded_at: DateTime<Utc>,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

#[derive(Debug, Default)]
struct Inner {
    // Insertion order for `list`.
    order: Vec<DatasetId>,
    by_id: HashMap<DatasetId, Arc<Dataset>>,
}

/// Thread-safe in-memory collection of datasets keyed by id.
#[derive(Debug, Default)]
pub struct DatasetStore {
    inner: RwLock<Inner>,
}

impl DatasetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `input` under a fresh random id and return the stored dataset.
    pub fn create(&self, input: NewDataset) -> Arc<Dataset> {
        let mut inner = self.inner.write();

        let mut id = Uuid::new_v4();
        while inner.by_id.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let dataset = Arc::new(Dataset::from_new(id, input));
        inner.order.push(id);
        inner.by_id.insert(id, Arc::clone(&dataset));
        drop(inner);

        tracing::debug!(%id, name = %dataset.name, rows = dataset.row_count, "dataset stored");
        dataset
    }

    /// Exact lookup by id.
    pub fn get(&self, id: &DatasetId) -> Option<Arc<Dataset>> {
        self.inner.read().by_id.get(id).cloned()
    }

    /// Lookup by the string form of an id. Malformed ids are simply not found.
    pub fn get_by_str(&self, id: &str) -> Option<Arc<Dataset>> {
        let id = Uuid::parse_str(id).ok()?;
        self.get(&id)
    }

    /// Summaries of all datasets, in insertion order.
    pub fn list(&self) -> Vec<DatasetSummary> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .map(|d| d.summary())
            .collect()
    }

    /// Remove a dataset. Returns whether anything was removed.
    pub fn delete(&self, id: &DatasetId) -> bool {
        let mut inner = self.inner.write();
        if inner.by_id.remove(id).is_none() {
            return false;
        }
        inner.order.retain(|existing| existing != id);
        drop(inner);

        tracing::debug!(%id, "dataset deleted");
        true
    }

    /// [`Self::delete`] keyed by the string form of an id.
    pub fn delete_by_str(&self, id: &str) -> bool {
        match Uuid::parse_str(id) {
            Ok(id) => self.delete(&id),
            Err(_) => false,
        }
    }

    /// Number of stored datasets.
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::{DatasetStore, NewDataset};
    use crate::types::{Table, Value};

    fn sample_input(name: &str) -> NewDataset {
        let table = Table::from_records(vec![
            vec![("Status", Value::from("A")), ("TotalDue", Value::Int64(10))],
            vec![("Status", Value::from("B")), ("TotalDue", Value::Null)],
        ]);
        NewDataset::from_table(name, table)
    }

    #[test]
    fn create_then_get_returns_input_plus_id() {
        let store = DatasetStore::new();
        let input = sample_input("orders.csv");
        let created = store.create(input.clone());

        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, input.name);
        assert_eq!(fetched.uploaded_at, input.uploaded_at);
        assert_eq!(fetched.row_count, 2);
        assert_eq!(fetched.column_count, 2);
        assert_eq!(fetched.table, input.table);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = DatasetStore::new();
        let created = store.create(sample_input("a.csv"));
        assert!(store.delete(&created.id));
        assert!(!store.delete(&created.id));
        assert!(store.get(&created.id).is_none());
    }

    #[test]
    fn list_is_in_insertion_order_and_tracks_deletes() {
        let store = DatasetStore::new();
        let a = store.create(sample_input("a.csv"));
        let b = store.create(sample_input("b.csv"));
        let c = store.create(sample_input("c.csv"));
        assert!(store.delete(&b.id));

        let names: Vec<String> = store.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a.csv", "c.csv"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].id, a.id);
        assert_eq!(store.list()[1].id, c.id);
    }

    #[test]
    fn string_ids_that_do_not_parse_are_not_found() {
        let store = DatasetStore::new();
        let created = store.create(sample_input("a.csv"));
        assert!(store.get_by_str("not-a-uuid").is_none());
        assert!(!store.delete_by_str("not-a-uuid"));
        assert!(store.get_by_str(&created.id.to_string()).is_some());
    }

    #[test]
    fn concurrent_creates_and_deletes_keep_counts_consistent() {
        let store = Arc::new(DatasetStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let mut kept = 0;
                    for j in 0..25 {
                        let d = store.create(sample_input(&format!("{i}-{j}.csv")));
                        if j % 5 == 0 {
                            assert!(store.delete(&d.id));
                        } else {
                            kept += 1;
                        }
                    }
                    kept
                })
            })
            .collect();

        let kept: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(store.list().len(), kept);
        assert_eq!(store.len(), kept);
    }

    #[test]
    fn dataset_serializes_rows_under_data() {
        let store = DatasetStore::new();
        let created = store.create(sample_input("a.csv"));
        let json = serde_json::to_value(created.as_ref()).unwrap();
        assert_eq!(json["columns"], serde_json::json!(["Status", "TotalDue"]));
        assert_eq!(json["data"][0], serde_json::json!({"Status": "A", "TotalDue": 10}));
        assert_eq!(json["data"][1]["TotalDue"], serde_json::Value::Null);
        assert_eq!(json["rowCount"], 2);
        assert!(json.get("rows").is_none());
    }
}
