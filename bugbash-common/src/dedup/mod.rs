//! Duplicate-report detection
//!
//! Flags likely-duplicate issue reports before a tester submits. The scorer
//! compares one pair of issues with a fixed rule set; the detector runs the
//! scorer over a candidate pool and ranks the survivors. Both are pure
//! functions over their inputs; nothing here touches the store or the hub.
//!
//! All thresholds and rule constants are fixed policy, not configuration.

mod detector;
mod scorer;

pub use detector::{candidate_pool, detect, DuplicateReport, DUPLICATE_THRESHOLD};
pub use scorer::{score_pair, DuplicateMatch};
