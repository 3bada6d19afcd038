//! Deterministic ranking, deduplication, and public-view projection.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::candidate::{Candidate, Logo};
use crate::score::{score, ScoreWeights};

/// Candidate plus its score and discovery sequence. Lives only inside the
/// ranking step; the score is stripped before anything leaves this module.
struct ScoredCandidate {
    candidate: Candidate,
    score: f64,
    seq: usize,
}

/// Score, order, deduplicate, and truncate candidates into the public view.
///
/// Ordering is by score descending with discovery order breaking ties, so
/// identical input always yields identical output. Duplicated URLs collapse
/// to their highest-scored occurrence before truncation, so repeats never
/// burn result slots.
#[must_use]
pub fn rank(candidates: Vec<Candidate>, weights: &ScoreWeights, max_results: usize) -> Vec<Logo> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .enumerate()
        .map(|(seq, candidate)| ScoredCandidate {
            score: score(&candidate, weights),
            candidate,
            seq,
        })
        .collect();

    // Scores are finite sums of finite weights, so the comparison is total
    // in practice; equal scores fall back to discovery order.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.seq.cmp(&b.seq))
    });

    let mut seen = HashSet::new();
    scored.retain(|s| seen.insert(s.candidate.url.clone()));
    scored.truncate(max_results);

    scored.into_iter().map(|s| Logo::from(s.candidate)).collect()
}
