//! Router setup
//!
//! One well-known WebSocket path (`/ws`) shared by all rooms; room
//! selection happens post-connect via `join:session`. `/publish` is the
//! ingress for server-side mutation handlers; `/health` is for monitoring.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::registry::RoomRegistry;

/// Shared application context passed to all handlers
///
/// AppContext implements Clone, which gives us `FromRef<AppContext>` for
/// free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub registry: Arc<RoomRegistry>,
}

/// Build the hub router
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(super::handlers::health))
        // Realtime connection path (single endpoint, all rooms)
        .route("/ws", get(super::ws::ws_handler))
        // Server-originated event ingress for mutation handlers
        .route("/publish", post(super::handlers::publish))
        .with_state(ctx)
        // Enable CORS for browser clients served from the app origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
