//! Plain HTTP handlers: health and the publish ingress

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use tracing::debug;

use bugbash_common::protocol::ClientEvent;

use super::server::AppContext;
use crate::relay;

/// GET /health - service status and connection count
pub async fn health(State(ctx): State<AppContext>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "bugbash-hub",
        "version": env!("CARGO_PKG_VERSION"),
        "connections": ctx.registry.peer_count(),
    }))
}

/// POST /publish - push a server-originated event into the relay
///
/// Mutation handlers (issue creation, validation, session changes) call this
/// after persisting a change. There is no sender connection to exclude, so
/// the event reaches every room member. Malformed bodies are rejected by the
/// typed extractor before this handler runs.
pub async fn publish(
    State(ctx): State<AppContext>,
    Json(event): Json<ClientEvent>,
) -> StatusCode {
    debug!("Publish ingress: {}", event.event_name());
    relay::dispatch(&ctx.registry, None, event);
    StatusCode::ACCEPTED
}
