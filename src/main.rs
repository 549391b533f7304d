use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabular_dashboard::server::{create_router, shutdown_signal, AppState, ServerConfig};
use tabular_dashboard::store::DatasetStore;

/// Upload CSV/Excel files and serve dashboard aggregations over them.
#[derive(Parser, Debug)]
#[command(name = "tabular-dashboard", version, about)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Largest accepted upload, in MiB
    #[arg(long, default_value_t = 50)]
    max_upload_mib: usize,

    /// Append ingestion outcomes to this file
    #[arg(long)]
    ingest_log: Option<PathBuf>,

    /// Disable the permissive CORS layer
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabular_dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ServerConfig::new(&args.host, args.port)
        .with_max_upload_bytes(args.max_upload_mib.saturating_mul(1024 * 1024))
        .with_cors(!args.no_cors)
        .with_ingest_log(args.ingest_log);

    let store = Arc::new(DatasetStore::new());
    let state = AppState::new(Arc::clone(&store), &config);
    let app = create_router(state, &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, cors = config.enable_cors, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(datasets = store.len(), "server stopped, discarding datasets");
    Ok(())
}
