//! Domain types for logo candidate extraction and the public result shape.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which kind of source produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// Page metadata tags (Open Graph, Twitter cards, tile images).
    Meta,
    /// schema.org structured data embedded in the page.
    Schema,
    /// Content-area `<img>` elements matched by logo heuristics.
    Content,
    /// Inline `<svg>` markup serialized to a data URL.
    Svg,
    /// Third-party logo service or conventional-path URL template.
    #[serde(rename = "external-service")]
    Service,
}

/// Secondary attributes derived from a candidate's URL and DOM context.
///
/// `width`/`height` may be filled synchronously from DOM attributes or later
/// by the image probe; `aspect_ratio` is recomputed once both are known.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureSet {
    pub format: Option<String>,
    pub is_vector: bool,
    pub has_logo_keyword: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub aspect_ratio: Option<f64>,
}

impl FeatureSet {
    /// Both dimensions known, so the quality gate can be applied directly.
    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

/// A single discovered logo image reference with provenance and features.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Image URL; relative at extraction time, absolute after resolution.
    pub url: String,
    pub kind: CandidateKind,
    /// Origin identifier: a metadata property name, `schema.org`, a
    /// CSS-selector-like pattern, or an external service name.
    pub source: String,
    /// A-priori trust prior for the source, independent of image quality.
    pub static_weight: i32,
    /// Alt/label text from the DOM, when the source carries one.
    pub label: Option<String>,
    pub features: FeatureSet,
}

impl Candidate {
    #[must_use]
    pub fn new(url: impl Into<String>, kind: CandidateKind, source: impl Into<String>, static_weight: i32) -> Self {
        Self {
            url: url.into(),
            kind,
            source: source.into(),
            static_weight,
            label: None,
            features: FeatureSet::default(),
        }
    }
}

/// Public, score-stripped view of a surviving candidate.
///
/// The internal score never leaves the ranking step; this projection is the
/// only candidate shape serialized to callers.
#[derive(Debug, Clone, Serialize)]
pub struct Logo {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: CandidateKind,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub is_vector: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
}

impl From<Candidate> for Logo {
    fn from(candidate: Candidate) -> Self {
        Self {
            url: candidate.url,
            kind: candidate.kind,
            source: candidate.source,
            format: candidate.features.format,
            is_vector: candidate.features.is_vector,
            width: candidate.features.width,
            height: candidate.features.height,
            aspect_ratio: candidate.features.aspect_ratio,
        }
    }
}

/// The sole output artifact of a lookup.
///
/// Serializes to `{success: true, domain, timestamp, logos}` or
/// `{success: false, domain, error}`. `logos` is empty only on failure.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LookupOutcome {
    Success {
        success: bool,
        domain: String,
        timestamp: DateTime<Utc>,
        logos: Vec<Logo>,
    },
    Failure {
        success: bool,
        domain: String,
        error: String,
    },
}

impl LookupOutcome {
    #[must_use]
    pub fn success(domain: String, logos: Vec<Logo>) -> Self {
        Self::Success {
            success: true,
            domain,
            timestamp: Utc::now(),
            logos,
        }
    }

    #[must_use]
    pub fn failure(domain: String, error: String) -> Self {
        Self::Failure {
            success: false,
            domain,
            error,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The ranked logos, empty for a failure outcome.
    #[must_use]
    pub fn logos(&self) -> &[Logo] {
        match self {
            Self::Success { logos, .. } => logos,
            Self::Failure { .. } => &[],
        }
    }
}
