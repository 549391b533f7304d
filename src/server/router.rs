//! Route table and middleware.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::ServerConfig;
use super::handlers;
use super::state::AppState;

/// Build the application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/upload", post(handlers::upload))
        .route("/datasets", get(handlers::list_datasets))
        .route(
            "/datasets/:id",
            get(handlers::get_dataset).delete(handlers::delete_dataset),
        )
        .route("/datasets/:id/dashboard", get(handlers::dashboard))
        .route("/datasets/:id/analytics", get(handlers::analytics));

    let router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}
