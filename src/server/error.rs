//! Request-boundary errors and their JSON bodies.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::error::IngestionError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short, user-facing message.
    pub error: String,
    /// Underlying cause, when there is one worth showing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Errors surfaced by the HTTP handlers. The display string is the `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Unsupported file type")]
    UnsupportedFileType,

    #[error("File is empty or could not be parsed")]
    EmptyOrUnparsableFile,

    #[error("File too large")]
    FileTooLarge,

    #[error("Failed to process file")]
    ParseFailure { details: String },

    #[error("Invalid upload")]
    InvalidUpload(#[from] MultipartError),

    #[error("Dataset not found")]
    DatasetNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFileProvided | ApiError::UnsupportedFileType | ApiError::EmptyOrUnparsableFile => {
                StatusCode::BAD_REQUEST
            }
            ApiError::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ParseFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidUpload(err) => err.status(),
            ApiError::DatasetNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::ParseFailure { details } => Some(details.clone()),
            ApiError::InvalidUpload(err) => Some(err.body_text()),
            _ => None,
        }
    }
}

impl From<IngestionError> for ApiError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::UnsupportedFormat { .. } => ApiError::UnsupportedFileType,
            IngestionError::EmptyTable { .. } => ApiError::EmptyOrUnparsableFile,
            other => ApiError::ParseFailure {
                details: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}
