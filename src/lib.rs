//! `tabular-dashboard` turns uploaded CSV and Excel files into in-memory datasets and computes
//! the chart series a sales dashboard draws from them.
//!
//! The pieces, bottom-up:
//!
//! - [`ingestion`]: classify an upload by file name and parse its bytes into a [`types::Table`]
//!   (first sheet only for workbooks, first row as headers, cell text coerced to numbers and
//!   booleans where it looks like one)
//! - [`store`]: a thread-safe, process-local [`store::DatasetStore`] keyed by UUID
//! - [`processing`]: pure aggregations (grouped sums, counts, daily buckets, totals) and the two
//!   fixed chart compositions, [`processing::DashboardView`] and [`processing::AnalyticsView`]
//! - [`server`]: the axum routes over all of the above
//!
//! ## What you can upload
//!
//! - **CSV**: `.csv`
//! - **Excel/workbooks** (requires the Cargo feature `excel`, on by default): `.xlsx`, `.xls`
//!
//! Suffix matching is case-sensitive. Empty cells and empty strings become [`types::Value::Null`].
//!
//! ## Quick example
//!
//! ```rust
//! use tabular_dashboard::ingestion::{ingest_upload, IngestionOptions};
//! use tabular_dashboard::processing::DashboardView;
//! use tabular_dashboard::store::{DatasetStore, NewDataset};
//!
//! # fn main() -> Result<(), tabular_dashboard::IngestionError> {
//! let csv = b"OrderDate,TerritoryID,Status,TotalDue\n\
//!             2024-01-01,1,5,100\n\
//!             2024-01-02,2,5,50\n";
//! let table = ingest_upload("orders.csv", csv, &IngestionOptions::default())?;
//!
//! let store = DatasetStore::new();
//! let dataset = store.create(NewDataset::from_table("orders.csv", table));
//! assert_eq!(dataset.row_count, 2);
//!
//! let view = DashboardView::compute(&dataset.table);
//! assert_eq!(view.metrics.total_sales, 150.0);
//! assert_eq!(view.metrics.order_count, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Ingestion outcomes go to an optional [`ingestion::IngestionObserver`]. The server installs a
//! [`ingestion::TracingObserver`] and, when asked for an ingest log, a
//! [`ingestion::FileObserver`] alongside it.

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod server;
pub mod store;
pub mod types;

pub use error::{IngestionError, IngestionResult};
