//! Local view state and reconciliation rules
//!
//! The rules must hold exactly, or repeated delivery shows duplicate rows
//! and missed delivery silently corrupts edits:
//! - `issue:created`: append only if the id is not already present
//! - `issue:refreshed`: replace in place by id; never insert when absent
//! - `session:data-updated`: wholesale replace, only for the viewed session
//! - `session-created`: prepend to the session list

use bugbash_common::model::{Issue, Session};
use bugbash_common::protocol::ServerEvent;

/// View state for one session page (issue list plus session header)
///
/// A best-effort cache of the store; staleness is bounded by the next
/// [`SessionView::resync`].
#[derive(Debug, Default)]
pub struct SessionView {
    session_id: String,
    session: Option<Session>,
    issues: Vec<Issue>,
}

impl SessionView {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            session: None,
            issues: Vec::new(),
        }
    }

    /// The session id this view is pinned to (its room key)
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Fold one inbound event into the view; returns true if state changed
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        match event {
            ServerEvent::IssueCreated(issue) => {
                if self.issues.iter().any(|existing| existing.id == issue.id) {
                    return false;
                }
                self.issues.push(issue.clone());
                true
            }
            ServerEvent::IssueRefreshed(issue) => {
                match self.issues.iter_mut().find(|existing| existing.id == issue.id) {
                    Some(slot) => {
                        *slot = issue.clone();
                        true
                    }
                    // Unknown id: do not insert, the full list comes from resync
                    None => false,
                }
            }
            ServerEvent::SessionDataUpdated(session) => {
                if session.id != self.session_id {
                    return false;
                }
                self.session = Some(session.clone());
                true
            }
            // Session creation belongs to the list view
            ServerEvent::SessionCreated(_) => false,
        }
    }

    /// Replace the whole view with freshly fetched state
    ///
    /// The explicit recovery path after a reconnect or suspected staleness;
    /// there is no partial repair.
    pub fn resync(&mut self, session: Session, issues: Vec<Issue>) {
        self.session = Some(session);
        self.issues = issues;
    }
}

/// View state for the sessions overview page
#[derive(Debug, Default)]
pub struct SessionListView {
    sessions: Vec<Session>,
}

impl SessionListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Fold one inbound event into the list; returns true if state changed
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        match event {
            ServerEvent::SessionCreated(session) => {
                // Newest first
                self.sessions.insert(0, session.clone());
                true
            }
            ServerEvent::SessionDataUpdated(session) => {
                match self.sessions.iter_mut().find(|existing| existing.id == session.id) {
                    Some(slot) => {
                        *slot = session.clone();
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Replace the list with freshly fetched state
    pub fn resync(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
    }
}
