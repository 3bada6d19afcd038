//! Content-area image extraction.
//!
//! Emulates the priority-ordered CSS selectors of a browser scraper
//! (`header img`, `.logo img`, `img[alt*="logo"]`, `img[src*="logo"]`,
//! `img[class*="logo"]`) over raw HTML; each image is claimed by the first
//! rule it matches.

use std::sync::LazyLock;

use regex::Regex;

use super::dom::{open_elements_at, OpenElement};
use super::{extract_attr, parse_dimension_attr};
use crate::candidate::{Candidate, CandidateKind};

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));

#[must_use]
pub fn extract_content_images(html: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for m in IMG_TAG_RE.find_iter(html) {
        let tag = m.as_str();
        let Some(src) = extract_attr(tag, "src").filter(|s| !s.trim().is_empty()) else {
            continue;
        };
        if src.starts_with("data:") {
            // Inline raster payloads are tracking pixels more often than logos.
            continue;
        }

        let alt = extract_attr(tag, "alt");
        let class = extract_attr(tag, "class")
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or_default();
        let ancestors = open_elements_at(html, m.start());

        let Some((source, weight)) = match_rule(&src, alt.as_deref(), &class, &ancestors) else {
            continue;
        };

        let mut candidate = Candidate::new(src, CandidateKind::Content, source, weight);
        candidate.label = alt;
        candidate.features.width = parse_dimension_attr(extract_attr(tag, "width"));
        candidate.features.height = parse_dimension_attr(extract_attr(tag, "height"));
        candidates.push(candidate);
    }

    candidates
}

/// First matching selector rule, with its weight. Rule order is the
/// priority order; weights decrease by one per subsequent rule.
fn match_rule(
    src: &str,
    alt: Option<&str>,
    class: &str,
    ancestors: &[OpenElement],
) -> Option<(&'static str, i32)> {
    if ancestors.iter().any(|e| e.name == "header") {
        return Some(("header img", 7));
    }
    if ancestors.iter().any(|e| e.marker_contains("logo")) {
        return Some((".logo img", 6));
    }
    if alt.is_some_and(|a| a.to_ascii_lowercase().contains("logo")) {
        return Some((r#"img[alt*="logo"]"#, 5));
    }
    if src.to_ascii_lowercase().contains("logo") {
        return Some((r#"img[src*="logo"]"#, 4));
    }
    if class.contains("logo") {
        return Some((r#"img[class*="logo"]"#, 3));
    }
    None
}
