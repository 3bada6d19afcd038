use thiserror::Error;

/// Errors from the HTML page source collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("all fetch attempts failed for {url}")]
    AllAttemptsFailed { url: String },
}

/// Terminal lookup failures surfaced in the failure outcome.
///
/// Per-candidate problems (a malformed JSON-LD block, a probe that cannot
/// decode an image) are absorbed where they occur and never become a
/// `LookupError`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("domain is empty after normalization")]
    EmptyDomain,

    #[error("could not fetch homepage for {domain}: {source}")]
    SourceUnavailable {
        domain: String,
        #[source]
        source: FetchError,
    },

    #[error("no logo candidates met the quality gate for {domain}")]
    NoCandidates { domain: String },
}
