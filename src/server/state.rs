//! Shared state handed to every handler.

use std::sync::Arc;

use crate::ingestion::{
    CompositeObserver, FileObserver, IngestionObserver, IngestionOptions, IngestionSeverity, TracingObserver,
};
use crate::store::DatasetStore;

use super::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    /// Process-wide dataset store.
    pub store: Arc<DatasetStore>,
    /// Options (observers, alert threshold) for every upload.
    pub ingestion: IngestionOptions,
    /// Largest accepted file, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wire the store to the ingestion observers named by `config`.
    pub fn new(store: Arc<DatasetStore>, config: &ServerConfig) -> Self {
        let observer: Arc<dyn IngestionObserver> = match &config.ingest_log {
            Some(path) => Arc::new(CompositeObserver::new(vec![
                Arc::new(TracingObserver),
                Arc::new(FileObserver::new(path)),
            ])),
            None => Arc::new(TracingObserver),
        };

        Self {
            store,
            ingestion: IngestionOptions {
                kind: None,
                observer: Some(observer),
                alert_at_or_above: IngestionSeverity::Critical,
            },
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("datasets", &self.store.len())
            .field("ingestion", &self.ingestion)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}
