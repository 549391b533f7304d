//! Server configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default cap on a single uploaded file.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024; // 50 MiB

/// Room for multipart boundaries and part headers on top of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Largest accepted file, in bytes.
    pub max_upload_bytes: usize,
    /// Install a permissive CORS layer.
    pub enable_cors: bool,
    /// Optional append-only log of ingestion outcomes.
    pub ingest_log: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            enable_cors: true,
            ingest_log: None,
        }
    }
}

impl ServerConfig {
    /// Create a new server config with the specified host and port.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..Default::default()
        }
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.enable_cors = enabled;
        self
    }

    pub fn with_ingest_log(mut self, path: Option<PathBuf>) -> Self {
        self.ingest_log = path;
        self
    }

    /// Limit applied to whole request bodies.
    pub fn body_limit_bytes(&self) -> usize {
        self.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }

    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], self.port)))
    }
}
