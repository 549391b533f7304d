//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_upload`], which turns an uploaded file (name + bytes) into an
//! in-memory [`crate::types::Table`].
//!
//! - If [`IngestionOptions::kind`] is `None`, the file kind is inferred from the file name.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.
//! - A table with zero data rows is rejected with [`IngestionError::EmptyTable`]; use [`parse`]
//!   directly to get the empty table instead.

use std::fmt;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::Table;

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported upload kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Spreadsheet,
    /// Comma-separated values.
    DelimitedText,
}

impl FileKind {
    /// Classify a file name by its suffix.
    ///
    /// Matching is exact and case-sensitive: `report.CSV` is not recognized.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".csv") {
            Some(Self::DelimitedText)
        } else if file_name.ends_with(".xlsx") || file_name.ends_with(".xls") {
            Some(Self::Spreadsheet)
        } else {
            None
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the kind from the file name.
    pub kind: Option<FileKind>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("kind", &self.kind)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            kind: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Parse raw bytes of a known kind into a [`Table`].
///
/// Pure function of its input. Returns an empty table (no columns, no rows) when the file has
/// no data rows.
///
/// # Examples
///
/// ```rust
/// use tabular_dashboard::ingestion::{parse, FileKind};
/// use tabular_dashboard::types::Value;
///
/// let table = parse(b"Status,Total\nShipped,10\n", FileKind::DelimitedText).unwrap();
/// assert_eq!(table.columns, vec!["Status", "Total"]);
/// assert_eq!(table.rows[0][1], Value::Int64(10));
/// ```
pub fn parse(bytes: &[u8], kind: FileKind) -> IngestionResult<Table> {
    match kind {
        FileKind::DelimitedText => csv::parse_csv(bytes),
        FileKind::Spreadsheet => parse_spreadsheet(bytes),
    }
}

fn parse_spreadsheet(bytes: &[u8]) -> IngestionResult<Table> {
    #[cfg(feature = "excel")]
    {
        super::excel::parse_workbook(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = bytes;
        Err(IngestionError::UnsupportedFormat {
            file_name: "spreadsheet (enable cargo feature 'excel')".to_string(),
        })
    }
}

/// Unified ingestion entry point for uploaded files.
///
/// The file name is classified before any parsing happens, so an unsupported suffix never
/// touches the bytes (and is not reported to the observer).
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```rust
/// use tabular_dashboard::ingestion::{ingest_upload, IngestionOptions};
/// use tabular_dashboard::IngestionError;
///
/// let opts = IngestionOptions::default();
/// let table = ingest_upload("orders.csv", b"OrderDate,TotalDue\n2024-01-01,10\n", &opts).unwrap();
/// assert_eq!(table.row_count(), 1);
///
/// let err = ingest_upload("notes.txt", b"hello", &opts).unwrap_err();
/// assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));
///
/// let err = ingest_upload("header_only.csv", b"a,b\n", &opts).unwrap_err();
/// assert!(matches!(err, IngestionError::EmptyTable { .. }));
/// ```
pub fn ingest_upload(
    file_name: &str,
    bytes: &[u8],
    options: &IngestionOptions,
) -> IngestionResult<Table> {
    let kind = match options.kind {
        Some(k) => k,
        None => FileKind::from_file_name(file_name).ok_or_else(|| {
            IngestionError::UnsupportedFormat {
                file_name: file_name.to_string(),
            }
        })?,
    };

    let ctx = IngestionContext {
        file_name: file_name.to_string(),
        kind,
        bytes: bytes.len(),
    };

    let result = parse(bytes, kind).and_then(|table| {
        if table.is_empty() {
            Err(IngestionError::EmptyTable {
                file_name: file_name.to_string(),
            })
        } else {
            Ok(table)
        }
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::ParseFailure { .. } => IngestionSeverity::Error,
        IngestionError::EmptyTable { .. } => IngestionSeverity::Warning,
        IngestionError::UnsupportedFormat { .. } => IngestionSeverity::Warning,
    }
}

/// Owned ingestion request.
///
/// Useful for moving an upload onto a blocking worker thread.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Original file name, used for kind detection.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_upload`].
    pub fn run(&self) -> IngestionResult<Table> {
        ingest_upload(&self.file_name, &self.bytes, &self.options)
    }
}
