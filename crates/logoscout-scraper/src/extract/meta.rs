//! Page metadata extraction (Open Graph, Twitter cards, tile images).

use std::sync::LazyLock;

use regex::Regex;

use super::extract_attr;
use crate::candidate::{Candidate, CandidateKind};

static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));

/// Metadata properties scanned for logo candidates, in trust order.
const META_PROPERTIES: &[(&str, i32)] = &[
    ("og:logo", 10),
    ("og:image", 8),
    ("twitter:image", 7),
    ("msapplication-TileImage", 6),
    ("application-name", 5),
];

/// One candidate per present property; the first matching tag wins.
#[must_use]
pub fn extract_meta_candidates(html: &str) -> Vec<Candidate> {
    META_PROPERTIES
        .iter()
        .filter_map(|&(property, weight)| {
            let content = find_meta_content(html, property)?;
            if content.trim().is_empty() {
                return None;
            }
            Some(Candidate::new(
                content,
                CandidateKind::Meta,
                property,
                weight,
            ))
        })
        .collect()
}

/// `content` of the first `<meta>` whose `property` or `name` matches.
fn find_meta_content(html: &str, wanted: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, "property").or_else(|| extract_attr(tag, "name"))?;
        if key.eq_ignore_ascii_case(wanted) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_candidate_per_present_property_in_trust_order() {
        let html = r#"
            <meta property="og:image" content="https://cdn.example.com/hero.jpg">
            <meta name="twitter:image" content="https://cdn.example.com/card.png">
        "#;
        let candidates = extract_meta_candidates(html);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].source, "og:image");
        assert_eq!(candidates[0].static_weight, 8);
        assert_eq!(candidates[1].source, "twitter:image");
        assert_eq!(candidates[1].static_weight, 7);
    }

    #[test]
    fn og_logo_outranks_og_image() {
        let html = r#"
            <meta property="og:image" content="/hero.jpg">
            <meta property="og:logo" content="/img/brand.svg">
        "#;
        let candidates = extract_meta_candidates(html);
        assert_eq!(candidates[0].source, "og:logo");
        assert_eq!(candidates[0].static_weight, 10);
        assert_eq!(candidates[0].url, "/img/brand.svg");
    }

    #[test]
    fn first_matching_tag_wins_per_property() {
        let html = r#"
            <meta property="og:image" content="/first.png">
            <meta property="og:image" content="/second.png">
        "#;
        let candidates = extract_meta_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "/first.png");
    }

    #[test]
    fn matches_name_attribute_and_ignores_case() {
        let html = r#"<meta name="msapplication-tileimage" content="/tile.png">"#;
        let candidates = extract_meta_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source, "msapplication-TileImage");
    }

    #[test]
    fn empty_content_yields_no_candidate() {
        let html = r#"<meta property="og:image" content=" ">"#;
        assert!(extract_meta_candidates(html).is_empty());
    }

    #[test]
    fn plain_page_yields_no_candidates() {
        assert!(extract_meta_candidates("<html><body>hi</body></html>").is_empty());
    }
}
