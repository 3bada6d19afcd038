//! Weighted candidate scoring.
//!
//! Observed deployments disagree on exact weight tables and aspect-ratio
//! thresholds, so every knob lives in [`ScoreWeights`] with one stock table
//! per lookup strategy rather than hard-coded branches.

use crate::candidate::{Candidate, CandidateKind};

/// Which aspect ratios earn the shape bonus.
#[derive(Debug, Clone, Copy)]
pub enum AspectRule {
    /// Ratio within `[min, max]` — near-square through moderately wide.
    Window { min: f64, max: f64 },
    /// `|1 - ratio| < tolerance` — strict near-square bias.
    NearSquare { tolerance: f64 },
}

impl AspectRule {
    #[must_use]
    pub fn matches(self, ratio: f64) -> bool {
        match self {
            Self::Window { min, max } => (min..=max).contains(&ratio),
            Self::NearSquare { tolerance } => (1.0 - ratio).abs() < tolerance,
        }
    }
}

/// The full scoring weight table for one strategy.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Both dimensions at or above this earn `size_large_bonus`.
    pub size_large_min: u32,
    pub size_large_bonus: f64,
    /// Both dimensions at or above this (but under the large cutoff) earn
    /// `size_ok_bonus`.
    pub size_ok_min: u32,
    pub size_ok_bonus: f64,
    pub vector_bonus: f64,
    pub url_keyword_bonus: f64,
    pub label_keyword_bonus: f64,
    pub meta_bonus: f64,
    pub schema_bonus: f64,
    pub content_bonus: f64,
    pub svg_bonus: f64,
    pub service_bonus: f64,
    pub aspect_rule: AspectRule,
    pub aspect_bonus: f64,
}

impl ScoreWeights {
    /// Stock table for the HTML-scraping strategy.
    #[must_use]
    pub fn scrape_default() -> Self {
        Self {
            size_large_min: 200,
            size_large_bonus: 5.0,
            size_ok_min: 100,
            size_ok_bonus: 3.0,
            vector_bonus: 3.0,
            url_keyword_bonus: 2.0,
            label_keyword_bonus: 2.0,
            meta_bonus: 3.0,
            schema_bonus: 4.0,
            content_bonus: 2.0,
            svg_bonus: 3.0,
            service_bonus: 0.0,
            aspect_rule: AspectRule::Window { min: 0.5, max: 2.0 },
            aspect_bonus: 2.0,
        }
    }

    /// Stock table for the service-lookup strategy: same bonuses, but a
    /// strict near-square aspect bias since favicon APIs return square art.
    #[must_use]
    pub fn service_default() -> Self {
        Self {
            aspect_rule: AspectRule::NearSquare { tolerance: 0.3 },
            ..Self::scrape_default()
        }
    }

    fn kind_bonus(&self, kind: CandidateKind) -> f64 {
        match kind {
            CandidateKind::Meta => self.meta_bonus,
            CandidateKind::Schema => self.schema_bonus,
            CandidateKind::Content => self.content_bonus,
            CandidateKind::Svg => self.svg_bonus,
            CandidateKind::Service => self.service_bonus,
        }
    }
}

/// Score a candidate against a weight table.
///
/// Pure and deterministic: identical candidate and features always produce
/// the identical score.
#[must_use]
pub fn score(candidate: &Candidate, weights: &ScoreWeights) -> f64 {
    let features = &candidate.features;
    let mut score = f64::from(candidate.static_weight);

    if let (Some(w), Some(h)) = (features.width, features.height) {
        if w >= weights.size_large_min && h >= weights.size_large_min {
            score += weights.size_large_bonus;
        } else if w >= weights.size_ok_min && h >= weights.size_ok_min {
            score += weights.size_ok_bonus;
        }
    }

    if features.is_vector {
        score += weights.vector_bonus;
    }
    if features.has_logo_keyword {
        score += weights.url_keyword_bonus;
    }
    if candidate
        .label
        .as_deref()
        .is_some_and(|l| l.to_ascii_lowercase().contains("logo"))
    {
        score += weights.label_keyword_bonus;
    }

    score += weights.kind_bonus(candidate.kind);

    if let Some(ratio) = features.aspect_ratio {
        if weights.aspect_rule.matches(ratio) {
            score += weights.aspect_bonus;
        }
    }

    score
}
