//! Network-free derivation of candidate features.

use crate::candidate::{Candidate, FeatureSet};

const VECTOR_FORMATS: &[&str] = &["svg", "eps", "ai"];

/// Extensions recognized as image formats. Anything else (including the
/// TLD of a bare domain path) is not a format.
const KNOWN_FORMATS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "bmp", "avif", "tiff", "eps", "ai",
];

/// Fill the URL-derived features of a candidate in place.
///
/// Dimensions are left untouched: DOM-declared values stay, and missing ones
/// are the dimension-enrichment step's job.
pub fn analyze(candidate: &mut Candidate) {
    let format = url_format(&candidate.url);
    candidate.features.is_vector = format
        .as_deref()
        .is_some_and(|f| VECTOR_FORMATS.contains(&f));
    candidate.features.format = format;
    candidate.features.has_logo_keyword = candidate.url.to_ascii_lowercase().contains("logo");
    refresh_aspect_ratio(&mut candidate.features);
}

/// Recompute `aspect_ratio` from the current dimensions.
pub fn refresh_aspect_ratio(features: &mut FeatureSet) {
    features.aspect_ratio = match (features.width, features.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some(f64::from(w) / f64::from(h)),
        _ => None,
    };
}

/// Lower-cased trailing extension of the URL path; query and fragment are
/// ignored. Data URLs report their media subtype.
fn url_format(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    if let Some(rest) = path.strip_prefix("data:image/") {
        let subtype = rest.split([';', ',']).next()?;
        return Some(match subtype {
            "svg+xml" => "svg".to_string(),
            other => other.to_ascii_lowercase(),
        });
    }

    let name = path.rsplit('/').next()?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    KNOWN_FORMATS.contains(&ext.as_str()).then_some(ext)
}
