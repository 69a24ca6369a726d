//! Duplicate detection over a candidate pool
//!
//! Runs the pairwise scorer against every candidate, keeps matches at or
//! above the threshold, and ranks them. Deterministic and pure with respect
//! to its inputs; candidates are never mutated.

use crate::model::Issue;

use super::scorer::{score_pair, DuplicateMatch};

/// Minimum score for a candidate to count as a likely duplicate
pub const DUPLICATE_THRESHOLD: u8 = 60;

/// Result of checking one issue against a candidate pool
#[derive(Debug, Clone)]
pub struct DuplicateReport {
    /// True iff at least one match survived the threshold
    pub is_duplicate: bool,
    /// Surviving matches, stable-sorted by score descending
    pub matches: Vec<DuplicateMatch>,
    /// Top match's score, or 0 when there are no matches
    pub confidence_score: u8,
}

/// Check `current` against a pre-filtered candidate pool
///
/// Callers filter the pool (same session, strictly older, different
/// reporter); see [`candidate_pool`].
pub fn detect(current: &Issue, candidates: &[Issue]) -> DuplicateReport {
    let mut matches: Vec<DuplicateMatch> = candidates
        .iter()
        .map(|candidate| score_pair(current, candidate))
        .filter(|m| m.score >= DUPLICATE_THRESHOLD)
        .collect();

    // Vec::sort_by is stable, so equal scores keep pool order
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    let confidence_score = matches.first().map(|m| m.score).unwrap_or(0);

    DuplicateReport {
        is_duplicate: !matches.is_empty(),
        matches,
        confidence_score,
    }
}

/// Filter a session's issues down to valid duplicate candidates
///
/// A candidate must belong to the same session, be strictly older than
/// `current`, and come from a different reporter. An author's own earlier
/// issues and anything newer are never candidates.
pub fn candidate_pool(current: &Issue, issues: &[Issue]) -> Vec<Issue> {
    issues
        .iter()
        .filter(|other| {
            other.session_id == current.session_id
                && other.created_at < current.created_at
                && other.reported_by != current.reported_by
        })
        .cloned()
        .collect()
}
