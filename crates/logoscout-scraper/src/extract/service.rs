//! External logo-service URL templates.
//!
//! The service strategy never touches the target site's HTML: candidates are
//! built from a fixed list of templates over the cleaned domain and only gain
//! dimensions once probed.

use crate::candidate::{Candidate, CandidateKind};

/// Conventional storefront logo paths, tried directly on the domain.
const CONVENTIONAL_PATHS: &[&str] = &[
    "/assets/images/logo.png",
    "/assets/logo.png",
    "/images/logo.png",
    "/logo.png",
    "/assets/img/logo.png",
    "/static/images/logo.png",
];

/// Build the full service candidate list for a cleaned domain.
///
/// Static weights encode source trust: the commercial logo API first, the
/// favicon-style APIs next, conventional path guesses last.
#[must_use]
pub fn service_candidates(domain: &str) -> Vec<Candidate> {
    let mut candidates = vec![
        Candidate::new(
            format!("https://www.google.com/s2/favicons?sz=256&domain={domain}"),
            CandidateKind::Service,
            "google",
            4,
        ),
        Candidate::new(
            format!("https://logo.clearbit.com/{domain}?size=512"),
            CandidateKind::Service,
            "clearbit",
            5,
        ),
        Candidate::new(
            format!("https://asset.brandfetch.io/icons/{domain}"),
            CandidateKind::Service,
            "brandfetch",
            4,
        ),
    ];

    for path in CONVENTIONAL_PATHS {
        candidates.push(Candidate::new(
            format!("https://{domain}{path}"),
            CandidateKind::Service,
            "alternate",
            3,
        ));
    }

    candidates
}
