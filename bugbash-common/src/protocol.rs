//! Wire protocol for the realtime hub
//!
//! Every frame is a JSON envelope `{"event": <name>, "data": <payload>}`.
//! Event names and payload keys are fixed by the deployed clients and must
//! not change. Payloads are typed and validated when a frame is decoded;
//! frames that do not match the schema are dropped at the relay boundary.

use serde::{Deserialize, Serialize};

use crate::model::{Issue, Session};

/// Events a client may send to the hub
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Join the room keyed by this session id. Idempotent.
    #[serde(rename = "join:session")]
    JoinSession(String),

    /// A tester submitted an issue; relayed to the rest of the room as
    /// `issue:created`. The submitter updates its own view optimistically.
    #[serde(rename = "issue:submitted")]
    IssueSubmitted(Issue),

    /// A lead validated/triaged an issue; relayed to the room as
    /// `issue:refreshed`.
    #[serde(rename = "issue:validated")]
    IssueValidated(Issue),

    /// A lead created a session; relayed to every connected client as
    /// `session-created` (session lists are viewed before any room join).
    #[serde(rename = "new-session")]
    NewSession(Session),

    /// Session fields changed; relayed to the room named by the session's
    /// `_id` as `session:data-updated`.
    #[serde(rename = "session:updated")]
    SessionUpdated(Session),
}

/// Events the hub emits to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// New issue in a room the client joined; append if not already present
    #[serde(rename = "issue:created")]
    IssueCreated(Issue),

    /// Updated issue; replace by id, never insert
    #[serde(rename = "issue:refreshed")]
    IssueRefreshed(Issue),

    /// New session anywhere; prepend to the session list
    #[serde(rename = "session-created")]
    SessionCreated(Session),

    /// Updated session; replace if it is the one currently viewed
    #[serde(rename = "session:data-updated")]
    SessionDataUpdated(Session),
}

impl ClientEvent {
    /// Get event name as string for logging/filtering
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientEvent::JoinSession(_) => "join:session",
            ClientEvent::IssueSubmitted(_) => "issue:submitted",
            ClientEvent::IssueValidated(_) => "issue:validated",
            ClientEvent::NewSession(_) => "new-session",
            ClientEvent::SessionUpdated(_) => "session:updated",
        }
    }

    /// Decode a wire frame, validating the payload schema
    pub fn decode(frame: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(frame)?)
    }
}

impl ServerEvent {
    /// Get event name as string for logging/filtering
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerEvent::IssueCreated(_) => "issue:created",
            ServerEvent::IssueRefreshed(_) => "issue:refreshed",
            ServerEvent::SessionCreated(_) => "session-created",
            ServerEvent::SessionDataUpdated(_) => "session:data-updated",
        }
    }

    /// Encode for the wire
    pub fn encode(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
