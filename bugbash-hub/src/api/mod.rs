//! HTTP/WebSocket API surface for the hub

pub mod handlers;
pub mod server;
pub mod ws;
