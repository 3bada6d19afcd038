//! Candidate extractors.
//!
//! Each extractor is a pure function over raw HTML (or, for the service
//! strategy, over the cleaned domain) producing zero or more raw candidates.
//! Absent tags, unparsable structured data, and selectors matching nothing
//! all yield zero candidates from that extractor, never an error.

mod content;
mod dom;
mod meta;
mod schema;
mod service;
mod svg;

pub use content::extract_content_images;
pub use meta::extract_meta_candidates;
pub use schema::extract_schema_candidates;
pub use service::service_candidates;
pub use svg::extract_inline_svgs;

use regex::Regex;

use crate::candidate::Candidate;

/// Run every document extractor in discovery order.
///
/// The order (metadata, structured data, content images, inline SVG) is part
/// of the ranking contract: it breaks score ties deterministically.
#[must_use]
pub fn collect_document_candidates(html: &str) -> Vec<Candidate> {
    let mut candidates = extract_meta_candidates(html);
    candidates.extend(extract_schema_candidates(html));
    candidates.extend(extract_content_images(html));
    candidates.extend(extract_inline_svgs(html));
    candidates
}

/// Pull a quoted attribute value out of a single raw tag.
pub(crate) fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(r#"(?is)\b{}\s*=\s*["']([^"']+)["']"#, regex::escape(attr));
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
}

/// Parse a declared `width`/`height` attribute value into whole units.
///
/// Accepts bare integers, floats, and a `px` suffix. Percentages and other
/// relative units carry no usable size and map to `None`.
// Fractional declared sizes are floored; values are pre-filtered to [1, f64
// finite] so the cast cannot truncate surprisingly.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn parse_dimension_attr(value: Option<String>) -> Option<u32> {
    let value = value?;
    let value = value.trim().trim_end_matches("px").trim();
    if value.is_empty() || value.ends_with('%') {
        return None;
    }
    if let Ok(dim) = value.parse::<u32>() {
        return (dim > 0).then_some(dim);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 1.0 && *d <= f64::from(u32::MAX))
        .map(|d| d as u32)
}
