//! Pairwise similarity scoring for issue reports
//!
//! Rules fire in order; an exact title match is decisive and short-circuits
//! at 100. Later rules only raise the score, never lower it. Missing titles
//! and descriptions are treated as empty strings; there is no error path,
//! scores simply come out low.

use std::collections::BTreeSet;

use crate::model::Issue;

/// A candidate issue paired with its duplicate-likelihood score
#[derive(Debug, Clone)]
pub struct DuplicateMatch {
    /// The candidate being compared against (not mutated, cloned out)
    pub issue: Issue,
    /// Duplicate likelihood, 0-100
    pub score: u8,
    /// Human-readable reasons for the score
    pub reasons: Vec<String>,
}

/// Score one candidate against the issue being drafted
pub fn score_pair(current: &Issue, candidate: &Issue) -> DuplicateMatch {
    let title_a = normalize(&current.title);
    let title_b = normalize(&candidate.title);

    // Rule 1: identical normalized titles are decisive. Two blank titles say
    // nothing about duplication, so equality requires a non-empty title.
    if !title_a.is_empty() && title_a == title_b {
        return DuplicateMatch {
            issue: candidate.clone(),
            score: 100,
            reasons: vec!["Identical title".to_string()],
        };
    }

    let mut score: u8 = 0;
    let mut reasons: Vec<String> = Vec::new();

    // Rule 2: same module, similar description
    if let (Some(module_a), Some(module_b)) = (current.module(), candidate.module()) {
        if module_a == module_b {
            let ratio = description_similarity(&current.description, &candidate.description);
            if ratio > 0.7 {
                score = 80;
                reasons.push("Same module with similar description".to_string());
            } else if ratio > 0.5 {
                score = 65;
                reasons.push("Same module with moderately similar description".to_string());
            }
        }
    }

    // Rule 3: title word overlap (Jaccard over tokens longer than 3 chars)
    let words_a = tokens(&title_a);
    let words_b = tokens(&title_b);
    if !words_a.is_empty() && !words_b.is_empty() {
        let intersection = words_a.intersection(&words_b).count();
        let union = words_a.union(&words_b).count();
        let ratio = intersection as f64 / union as f64;

        if ratio > 0.7 {
            let overlap_score = (60.0 + (ratio - 0.7) * 50.0).round() as u8;
            if overlap_score > score {
                score = overlap_score;
                reasons.push(overlap_reason(ratio));
            }
        } else if ratio > 0.5 && score < 60 {
            score = (50.0 + (ratio - 0.5) * 50.0).round() as u8;
            reasons.push(overlap_reason(ratio));
        }
    }

    DuplicateMatch {
        issue: candidate.clone(),
        score,
        reasons,
    }
}

fn overlap_reason(ratio: f64) -> String {
    format!("{}% title word overlap", (ratio * 100.0).round() as u32)
}

/// Trim, lowercase, collapse internal whitespace to single spaces
pub(crate) fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens longer than 3 characters from an already-normalized string
fn tokens(normalized: &str) -> BTreeSet<&str> {
    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .collect()
}

/// Description similarity ratio in [0, 1]; first applicable branch wins
///
/// Empty descriptions never satisfy the equality, substring, or prefix
/// branches; they fall through to token comparison, which yields 0 for an
/// empty token set.
pub(crate) fn description_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);

    if !norm_a.is_empty() && !norm_b.is_empty() {
        if norm_a == norm_b {
            return 1.0;
        }

        let (shorter, longer) = if norm_a.len() <= norm_b.len() {
            (&norm_a, &norm_b)
        } else {
            (&norm_b, &norm_a)
        };
        if longer.contains(shorter.as_str()) {
            return shorter.chars().count() as f64 / longer.chars().count() as f64;
        }

        let prefix_a: String = norm_a.chars().take(50).collect();
        let prefix_b: String = norm_b.chars().take(50).collect();
        if prefix_a == prefix_b && prefix_a.chars().count() > 10 {
            return 0.8;
        }
    }

    let words_a = tokens(&norm_a);
    let words_b = tokens(&norm_b);
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let common = words_a.intersection(&words_b).count();
    common as f64 / words_a.len().max(words_b.len()) as f64
}
