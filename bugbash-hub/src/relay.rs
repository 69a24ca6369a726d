//! Client-event dispatch: the relay table
//!
//! Maps each inbound event to its server-side re-emission. Client-originated
//! frames arrive with `sender = Some(conn)`; mutation handlers pushing
//! through the publish ingress pass `None`. Only `issue:submitted` excludes
//! its sender; the submitting client already applied the change
//! optimistically. Everything else is idempotent on the client side, so
//! echoing it back is harmless.

use tracing::debug;

use bugbash_common::protocol::{ClientEvent, ServerEvent};

use crate::registry::{ConnId, RoomRegistry};

/// Apply one inbound event to the registry
pub fn dispatch(registry: &RoomRegistry, sender: Option<ConnId>, event: ClientEvent) {
    debug!(
        "Dispatching {} from {:?}",
        event.event_name(),
        sender.map(|c| c.to_string())
    );

    match event {
        ClientEvent::JoinSession(session_id) => {
            if let Some(conn) = sender {
                registry.join(conn, &session_id);
            }
        }
        ClientEvent::IssueSubmitted(issue) => {
            let room = issue.session_id.clone();
            registry.send_to_room(&room, sender, ServerEvent::IssueCreated(issue));
        }
        ClientEvent::IssueValidated(issue) => {
            let room = issue.session_id.clone();
            registry.send_to_room(&room, None, ServerEvent::IssueRefreshed(issue));
        }
        ClientEvent::NewSession(session) => {
            // Global: session lists are viewed before any room join exists
            registry.broadcast(ServerEvent::SessionCreated(session));
        }
        ClientEvent::SessionUpdated(session) => {
            let room = session.id.clone();
            registry.send_to_room(&room, None, ServerEvent::SessionDataUpdated(session));
        }
    }
}
