//! # BugBash Common Library
//!
//! Shared code for the BugBash realtime core:
//! - Domain models (sessions, issues)
//! - Wire protocol event types (ClientEvent / ServerEvent)
//! - Duplicate-report detection (scorer + detector)
//! - Configuration resolution
//! - Error types

pub mod config;
pub mod dedup;
pub mod error;
pub mod model;
pub mod protocol;

pub use error::{Error, Result};
