//! Inline vector-graphic extraction.

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;

use super::dom::open_elements_at;
use super::{extract_attr, parse_dimension_attr};
use crate::candidate::{Candidate, CandidateKind};

static SVG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b.*?</svg>").expect("valid regex"));

const STATIC_WEIGHT: i32 = 8;

/// Declared dimensions at or above this are treated as page illustrations,
/// not logos.
const MAX_DECLARED_DIM: u32 = 500;

/// Characters that must be escaped for SVG markup inside a data URL.
const SVG_DATA_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'#')
    .add(b'%')
    .add(b'{')
    .add(b'}')
    .add(b'&');

/// Extract inline `<svg>` elements that plausibly render the site logo.
///
/// An element qualifies only when its own class mentions `logo`, or it sits
/// under an open `<header>` / logo- or header-marked container — and any
/// declared width/height stays under [`MAX_DECLARED_DIM`]. Qualifying markup
/// is serialized to a `data:image/svg+xml` URL.
#[must_use]
pub fn extract_inline_svgs(html: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for m in SVG_RE.find_iter(html) {
        let markup = m.as_str();
        let open_tag_end = markup.find('>').map_or(markup.len(), |i| i + 1);
        let open_tag = &markup[..open_tag_end];

        let own_class = extract_attr(open_tag, "class")
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or_default();

        let in_logo_container = own_class.contains("logo") || {
            let ancestors = open_elements_at(html, m.start());
            ancestors.iter().any(|e| {
                e.name == "header" || e.marker_contains("logo") || e.marker_contains("header")
            })
        };
        if !in_logo_container {
            continue;
        }

        let width = parse_dimension_attr(extract_attr(open_tag, "width"));
        let height = parse_dimension_attr(extract_attr(open_tag, "height"));
        if width.is_some_and(|w| w >= MAX_DECLARED_DIM)
            || height.is_some_and(|h| h >= MAX_DECLARED_DIM)
        {
            continue;
        }

        let url = format!(
            "data:image/svg+xml,{}",
            utf8_percent_encode(markup, SVG_DATA_SET)
        );
        let mut candidate = Candidate::new(url, CandidateKind::Svg, "inline-svg", STATIC_WEIGHT);
        candidate.features.width = width;
        candidate.features.height = height;
        candidates.push(candidate);
    }

    candidates
}
