//! Minimal open-element tracking over raw HTML.
//!
//! Answers "which elements are still open at byte offset N" well enough to
//! emulate ancestor selectors like `header img` and `.logo svg` without a
//! full DOM parse. Void elements never enter the stack, and `<script>` /
//! `<style>` bodies are skipped so markup inside string literals cannot
//! corrupt it.

use std::sync::LazyLock;

use regex::Regex;

use super::extract_attr;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<(/?)([a-z][a-z0-9-]*)((?:"[^"]*"|'[^']*'|[^>"'])*)>"#).expect("valid regex")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone)]
pub(crate) struct OpenElement {
    pub name: String,
    /// Lower-cased `class` attribute, empty when absent.
    pub class: String,
    /// Lower-cased `id` attribute, empty when absent.
    pub id: String,
}

impl OpenElement {
    /// Does the element's class or id contain the (lower-case) needle?
    pub fn marker_contains(&self, needle: &str) -> bool {
        self.class.contains(needle) || self.id.contains(needle)
    }
}

/// Elements still open at `pos`, outermost first.
///
/// Mismatched close tags pop back to the nearest matching open element and
/// stray closers are ignored, which tolerates the unbalanced markup real
/// pages ship.
pub(crate) fn open_elements_at(html: &str, pos: usize) -> Vec<OpenElement> {
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut raw_text_until: Option<String> = None;

    for caps in TAG_RE.captures_iter(&html[..pos]) {
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        let attrs = caps.get(3).map_or("", |m| m.as_str());

        if let Some(raw_name) = &raw_text_until {
            if closing && name == *raw_name {
                raw_text_until = None;
            }
            continue;
        }

        if closing {
            if let Some(idx) = stack.iter().rposition(|e| e.name == name) {
                stack.truncate(idx);
            }
            continue;
        }

        let self_closing = attrs.trim_end().ends_with('/');

        if (name == "script" || name == "style") && !self_closing {
            raw_text_until = Some(name);
            continue;
        }

        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            continue;
        }

        let tag = caps.get(0).map_or("", |m| m.as_str());
        stack.push(OpenElement {
            name,
            class: extract_attr(tag, "class")
                .map(|c| c.to_ascii_lowercase())
                .unwrap_or_default(),
            id: extract_attr(tag, "id")
                .map(|i| i.to_ascii_lowercase())
                .unwrap_or_default(),
        });
    }

    stack
}
