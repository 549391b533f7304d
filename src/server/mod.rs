//! HTTP surface over the dataset store.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | `POST` | `/api/upload` | multipart field `file`; `{id, name, rowCount, columnCount}` |
//! | `GET` | `/api/datasets` | dataset summaries, oldest first |
//! | `GET` | `/api/datasets/:id` | full dataset with rows under `data` |
//! | `DELETE` | `/api/datasets/:id` | `{success: true}` |
//! | `GET` | `/api/datasets/:id/dashboard` | [`crate::processing::DashboardView`] |
//! | `GET` | `/api/datasets/:id/analytics` | [`crate::processing::AnalyticsView`] |
//! | `GET` | `/health` | `{status, version}` |
//!
//! Errors are JSON bodies of the form `{"error": "...", "details": "..."}`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use router::create_router;
pub use state::AppState;

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
