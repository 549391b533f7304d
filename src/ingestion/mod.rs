//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_upload`] (from [`unified`]) which:
//!
//! - classifies the upload by file name (or you can force a kind via [`IngestionOptions`])
//! - parses the bytes into an in-memory [`crate::types::Table`]
//! - rejects files without data rows
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific parsers are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
mod normalize;
pub mod observability;
pub mod unified;

pub use normalize::EMPTY_HEADER;
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{ingest_upload, parse, FileKind, IngestionOptions, IngestionRequest};
