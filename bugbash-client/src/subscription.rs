//! Session subscription lifecycle
//!
//! Wraps one connection's channel pair for the lifetime of a page view:
//! joins the room on attach, folds inbound events into a [`SessionView`],
//! forwards client-originated mutations, and detaches cleanly on close so a
//! remount never double-applies events.
//!
//! Sends are best effort, matching the hub's delivery contract: a dead
//! connection makes the view stale, and staleness is repaired only by
//! [`SessionSubscription::resync`].

use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use bugbash_common::model::{Issue, Session};
use bugbash_common::protocol::{ClientEvent, ServerEvent};

use crate::view::SessionView;

/// An active room subscription for one session page
pub struct SessionSubscription {
    view: SessionView,
    outbound: UnboundedSender<ClientEvent>,
    inbound: UnboundedReceiver<ServerEvent>,
}

impl SessionSubscription {
    /// Join the session's room and start mirroring it
    ///
    /// `outbound` is the connection's send half, `inbound` the stream of
    /// decoded server events for this connection.
    pub fn attach(
        session_id: impl Into<String>,
        outbound: UnboundedSender<ClientEvent>,
        inbound: UnboundedReceiver<ServerEvent>,
    ) -> Self {
        let view = SessionView::new(session_id);
        let _ = outbound.send(ClientEvent::JoinSession(view.session_id().to_string()));
        debug!("Subscribed to session {}", view.session_id());
        Self {
            view,
            outbound,
            inbound,
        }
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Send a client-originated mutation event for the hub to relay
    ///
    /// Best effort: a closed connection drops the event, and the local view
    /// is expected to have been updated optimistically by the caller.
    pub fn emit(&self, event: ClientEvent) {
        let _ = self.outbound.send(event);
    }

    /// Apply every event already queued on the connection; returns how many
    /// changed the view
    pub fn process_pending(&mut self) -> usize {
        let mut changed = 0;
        loop {
            match self.inbound.try_recv() {
                Ok(event) => {
                    if self.view.apply(&event) {
                        changed += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// Wait for the next event and apply it
    ///
    /// Returns None when the connection is gone; the caller should resync
    /// after reconnecting.
    pub async fn next_event(&mut self) -> Option<ServerEvent> {
        let event = self.inbound.recv().await?;
        self.view.apply(&event);
        Some(event)
    }

    /// Replace the mirrored state with a fresh fetch from the read API
    pub fn resync(&mut self, session: Session, issues: Vec<Issue>) {
        self.view.resync(session, issues);
    }

    /// Detach from the connection, returning the final view state
    ///
    /// Dropping the receiver is the unsubscribe: nothing delivered after
    /// this point can reach the old page's state.
    pub fn close(self) -> SessionView {
        debug!("Unsubscribed from session {}", self.view.session_id());
        self.view
    }
}
