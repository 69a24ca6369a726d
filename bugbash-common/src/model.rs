//! Domain models for the realtime core
//!
//! These mirror the documents owned by the CRUD layer. The core never
//! persists them; they only cross the wire and live in client view state.
//! Field names follow the document-store wire keys (`_id`, `sessionId`, ...)
//! so relayed payloads interoperate with existing clients byte-for-byte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Test session lifecycle status (lead-controlled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Active,
    Stopped,
}

/// Whether a session's testing round has been completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionStatus {
    Active,
    Completed,
}

/// Issue lifecycle status
///
/// Canonical set for this codebase. The legacy `NOT_VALIDATED` constant is
/// accepted on input and maps to `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    #[serde(alias = "NOT_VALIDATED")]
    Submitted,
    Validated,
    Rejected,
    EditRequested,
}

impl Default for IssueStatus {
    fn default() -> Self {
        IssueStatus::Submitted
    }
}

/// A test session document
///
/// The session identifier doubles as the multicast room key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: SessionStatus,
    #[serde(rename = "completionStatus")]
    pub completion_status: CompletionStatus,
}

/// An issue report document
///
/// `fields` is the reporter-supplied free-form bag; the duplicate detector
/// reads its `module` entry when present. Missing title/description
/// deserialize to empty strings rather than failing the frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "reportedBy", default)]
    pub reported_by: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Issue {
    /// Reporter-supplied module tag, if any
    pub fn module(&self) -> Option<&str> {
        self.fields.get("module").map(String::as_str)
    }
}
