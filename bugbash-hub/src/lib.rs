//! # BugBash Hub
//!
//! Single-process realtime relay for test-session coordination. Clients
//! connect over one WebSocket endpoint, join rooms keyed by session id, and
//! the hub fans mutation events out to room members (or to everyone, for
//! session creation). Delivery is best effort: no durable queue, no
//! redelivery. A reconnecting client resynchronizes via the read API of the
//! CRUD layer, not the hub.

pub mod api;
pub mod registry;
pub mod relay;

pub use api::server::{create_router, AppContext};
pub use registry::{ConnId, RoomRegistry};
