//! HTTP request handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::error::IngestionError;
use crate::ingestion::IngestionRequest;
use crate::processing::{AnalyticsView, DashboardView};
use crate::store::{DatasetSummary, NewDataset};

use super::error::{ApiError, ErrorResponse};
use super::state::AppState;

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Id of the stored dataset.
    pub id: Uuid,
    /// Original file name.
    pub name: String,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always `true`; a missing dataset is a 404 instead.
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` while the server is serving.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

// ==================== Health ====================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ==================== Upload ====================

/// Accept one file, parse it off the async runtime, and store the result.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A part without a filename is a plain form value, not a file.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes));
        break;
    }

    let Some((file_name, bytes)) = upload else {
        return Err(ApiError::NoFileProvided);
    };
    if bytes.len() > state.max_upload_bytes {
        tracing::warn!(file = %file_name, bytes = bytes.len(), "upload exceeds size limit");
        return Err(ApiError::FileTooLarge);
    }

    let request = IngestionRequest {
        file_name: file_name.clone(),
        bytes: Vec::from(bytes),
        options: state.ingestion.clone(),
    };
    let table = tokio::task::spawn_blocking(move || request.run())
        .await
        .map_err(|e| ApiError::ParseFailure { details: e.to_string() })?
        .map_err(|e| {
            if let IngestionError::UnsupportedFormat { .. } = e {
                tracing::warn!(file = %file_name, "unsupported file type");
            }
            ApiError::from(e)
        })?;

    let dataset = state.store.create(NewDataset::from_table(file_name, table));
    Ok(Json(UploadResponse {
        id: dataset.id,
        name: dataset.name.clone(),
        row_count: dataset.row_count,
        column_count: dataset.column_count,
    }))
}

// ==================== Datasets ====================

pub async fn list_datasets(State(state): State<AppState>) -> Json<Vec<DatasetSummary>> {
    Json(state.store.list())
}

/// Full dataset including every row.
pub async fn get_dataset(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let dataset = state.store.get_by_str(&id).ok_or(ApiError::DatasetNotFound)?;
    Ok(Json(dataset.as_ref()).into_response())
}

pub async fn delete_dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if state.store.delete_by_str(&id) {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(ApiError::DatasetNotFound)
    }
}

// ==================== Views ====================

pub async fn dashboard(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<DashboardView>, ApiError> {
    let dataset = state.store.get_by_str(&id).ok_or(ApiError::DatasetNotFound)?;
    Ok(Json(DashboardView::compute(&dataset.table)))
}

pub async fn analytics(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<AnalyticsView>, ApiError> {
    let dataset = state.store.get_by_str(&id).ok_or(ApiError::DatasetNotFound)?;
    Ok(Json(AnalyticsView::compute(&dataset.table)))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
            details: None,
        }),
    )
}
