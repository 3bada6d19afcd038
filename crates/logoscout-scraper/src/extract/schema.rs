//! schema.org structured-data extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::candidate::{Candidate, CandidateKind};

static LDJSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

const STATIC_WEIGHT: i32 = 9;

/// Extract logo candidates from `<script type="application/ld+json">` blocks.
///
/// Malformed JSON blocks are silently skipped. `logo` is preferred over
/// `image` when an object carries both.
#[must_use]
pub fn extract_schema_candidates(html: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for cap in LDJSON_RE.captures_iter(html) {
        let json_text = match cap.get(1) {
            Some(m) => m.as_str(),
            None => continue,
        };

        let value: serde_json::Value = match serde_json::from_str(json_text) {
            Ok(v) => v,
            Err(_) => continue,
        };

        // Accept top-level object, array, or @graph container.
        let mut items: Vec<serde_json::Value> = if let Some(arr) = value.as_array() {
            arr.clone()
        } else {
            vec![value]
        };

        // Expand @graph containers: many sites wrap structured data inside
        // {"@graph": [...]} at the top level.
        let mut expanded = Vec::new();
        for item in &items {
            if let Some(graph) = item.get("@graph").and_then(serde_json::Value::as_array) {
                expanded.extend(graph.iter().cloned());
            }
        }
        items.extend(expanded);

        for item in items {
            if let Some(url) = schema_image_url(&item) {
                candidates.push(Candidate::new(
                    url,
                    CandidateKind::Schema,
                    "schema.org",
                    STATIC_WEIGHT,
                ));
            }
        }
    }

    candidates
}

fn schema_image_url(item: &serde_json::Value) -> Option<String> {
    item.get("logo")
        .and_then(image_ref)
        .or_else(|| item.get("image").and_then(image_ref))
}

/// Resolve a schema image value to a URL string.
///
/// In the wild the value may be a bare string, an `ImageObject` carrying
/// `url` or `@id`, or an array of either.
fn image_ref(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("@id"))
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string()),
        serde_json::Value::Array(items) => items.iter().find_map(image_ref),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_logo_url_from_jsonld_block() {
        let html = r#"
            <script type="application/ld+json">{"logo":"https://cdn.x.com/l.png"}</script>
        "#;
        let candidates = extract_schema_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://cdn.x.com/l.png");
        assert_eq!(candidates[0].kind, CandidateKind::Schema);
        assert_eq!(candidates[0].source, "schema.org");
        assert_eq!(candidates[0].static_weight, 9);
    }

    #[test]
    fn logo_is_preferred_over_image() {
        let html = r#"
            <script type="application/ld+json">
            {"logo": "https://cdn.x.com/logo.png", "image": "https://cdn.x.com/photo.jpg"}
            </script>
        "#;
        let candidates = extract_schema_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://cdn.x.com/logo.png");
    }

    #[test]
    fn falls_back_to_image_field() {
        let html = r#"
            <script type="application/ld+json">{"image": "https://cdn.x.com/photo.jpg"}</script>
        "#;
        let candidates = extract_schema_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://cdn.x.com/photo.jpg");
    }

    #[test]
    fn malformed_json_is_silently_skipped() {
        let html = r#"
            <script type="application/ld+json">{not json at all</script>
            <script type="application/ld+json">{"logo": "https://cdn.x.com/ok.png"}</script>
        "#;
        let candidates = extract_schema_candidates(html);
        assert_eq!(candidates.len(), 1, "the valid sibling block must survive");
        assert_eq!(candidates[0].url, "https://cdn.x.com/ok.png");
    }

    #[test]
    fn expands_graph_containers() {
        let html = r#"
            <script type="application/ld+json">
            {"@graph": [
                {"@type": "Organization", "logo": "https://cdn.x.com/org.png"},
                {"@type": "WebSite"}
            ]}
            </script>
        "#;
        let candidates = extract_schema_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://cdn.x.com/org.png");
    }

    #[test]
    fn accepts_image_object_with_url_field() {
        let html = r#"
            <script type="application/ld+json">
            {"logo": {"@type": "ImageObject", "url": "https://cdn.x.com/obj.png"}}
            </script>
        "#;
        let candidates = extract_schema_candidates(html);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://cdn.x.com/obj.png");
    }

    #[test]
    fn top_level_array_yields_one_candidate_per_object() {
        let html = r#"
            <script type="application/ld+json">
            [{"logo": "https://a.com/1.png"}, {"logo": "https://a.com/2.png"}]
            </script>
        "#;
        let candidates = extract_schema_candidates(html);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn objects_without_logo_or_image_yield_nothing() {
        let html = r#"
            <script type="application/ld+json">{"@type": "Article", "name": "hello"}</script>
        "#;
        assert!(extract_schema_candidates(html).is_empty());
    }
}
