//! Building-orientation tile API service library.
//!
//! Exposes the router and state types so integration tests can drive the
//! service without binding a socket.

pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the service router over shared application state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))
        // Tile endpoint: /{zoom}/{x}/{y}.{ext}
        .route("/:zoom/:x/:y", get(handlers::tile_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
