//! Domain normalization for lookup input.

/// Normalize a user-supplied domain into the bare host form used everywhere
/// downstream: scheme, `www.` prefix, trailing slashes, and surrounding
/// whitespace stripped; lower-cased.
///
/// `"https://www.Example.com/"` becomes `"example.com"`.
#[must_use]
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim();

    for scheme in ["https://", "http://"] {
        if let Some(rest) = strip_prefix_ignore_case(domain, scheme) {
            domain = rest;
            break;
        }
    }
    if let Some(rest) = strip_prefix_ignore_case(domain, "www.") {
        domain = rest;
    }

    domain.trim_end_matches('/').to_lowercase()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
