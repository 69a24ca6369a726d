//! # BugBash Client Adapter
//!
//! Per-page subscription logic: join the room for the entity being viewed
//! and fold inbound hub events into local view state. The views are one-way,
//! best-effort mirrors of the store; they can go stale whenever delivery is
//! missed, and the only recovery path is an explicit resync from the read
//! API. Reconciliation is idempotent by entity id, which is what masks
//! double delivery.

pub mod subscription;
pub mod view;

pub use subscription::SessionSubscription;
pub use view::{SessionListView, SessionView};
