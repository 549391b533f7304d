use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV and (optional) Excel ingestion. Store lookups
/// do not fail; they return `Option`/`bool` instead.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The file name (or forced kind) does not map to an enabled ingestion format.
    #[error("unsupported file type: '{file_name}'")]
    UnsupportedFormat { file_name: String },

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Delimited text could not be read (invalid UTF-8, malformed quoting, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Bytes decoded but do not form a usable table.
    #[error("failed to parse table: {message}")]
    ParseFailure { message: String },

    /// Parsing succeeded but produced zero data rows.
    #[error("file '{file_name}' is empty or has no data rows")]
    EmptyTable { file_name: String },
}

impl IngestionError {
    /// `true` for errors raised while decoding bytes, as opposed to rejected input.
    pub fn is_parse_failure(&self) -> bool {
        match self {
            IngestionError::Csv(_) | IngestionError::ParseFailure { .. } => true,
            #[cfg(feature = "excel")]
            IngestionError::Excel(_) => true,
            IngestionError::UnsupportedFormat { .. } | IngestionError::EmptyTable { .. } => false,
        }
    }
}
