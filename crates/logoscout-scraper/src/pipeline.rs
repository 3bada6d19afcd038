//! Lookup pipeline orchestration.
//!
//! Sequences extraction, URL resolution, feature analysis, dimension
//! enrichment, the quality gate, and ranking into a single
//! `domain -> LookupOutcome` transformation. Failures never escape as
//! errors: every path ends in a success or failure outcome.

use futures::stream::{self, StreamExt};
use logoscout_core::AppConfig;
use url::Url;

use crate::candidate::{Candidate, Logo, LookupOutcome};
use crate::domain::normalize_domain;
use crate::error::LookupError;
use crate::extract;
use crate::features;
use crate::fetch::{HttpPageSource, PageSource};
use crate::probe::{HttpImageProbe, ImageProbe};
use crate::rank;
use crate::score::ScoreWeights;

/// How candidates are gathered for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Scrape the domain's homepage HTML.
    Scrape,
    /// Query external logo services and conventional paths, no HTML fetch.
    Services,
}

/// Tunables for one finder instance.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub strategy: LookupStrategy,
    pub weights: ScoreWeights,
    /// Minimum width and height a candidate must report to survive the
    /// quality gate.
    pub min_dimension: u32,
    pub max_results: usize,
    pub probe_concurrency: usize,
}

impl FinderConfig {
    /// Defaults for the HTML-scraping strategy.
    #[must_use]
    pub fn scrape() -> Self {
        Self {
            strategy: LookupStrategy::Scrape,
            weights: ScoreWeights::scrape_default(),
            min_dimension: 100,
            max_results: 3,
            probe_concurrency: 8,
        }
    }

    /// Defaults for the service-lookup strategy.
    #[must_use]
    pub fn services() -> Self {
        Self {
            strategy: LookupStrategy::Services,
            weights: ScoreWeights::service_default(),
            ..Self::scrape()
        }
    }

    /// Strategy defaults with the app-level knobs applied.
    #[must_use]
    pub fn from_app_config(app: &AppConfig, strategy: LookupStrategy) -> Self {
        let base = match strategy {
            LookupStrategy::Scrape => Self::scrape(),
            LookupStrategy::Services => Self::services(),
        };
        Self {
            min_dimension: app.min_dimension,
            max_results: app.max_results,
            probe_concurrency: app.probe_concurrency.max(1),
            ..base
        }
    }
}

/// The lookup engine: candidate extraction, enrichment, and ranking over a
/// page source and an image probe.
pub struct LogoFinder<S, P> {
    source: S,
    probe: P,
    config: FinderConfig,
}

impl LogoFinder<HttpPageSource, HttpImageProbe> {
    /// Build a finder with the HTTP collaborators configured from the app
    /// config.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if an HTTP client cannot be constructed.
    pub fn from_app_config(
        app: &AppConfig,
        strategy: LookupStrategy,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            source: HttpPageSource::new(app.request_timeout_secs, &app.user_agent)?,
            probe: HttpImageProbe::new(app.probe_timeout_secs, &app.user_agent)?,
            config: FinderConfig::from_app_config(app, strategy),
        })
    }
}

impl<S: PageSource, P: ImageProbe> LogoFinder<S, P> {
    pub fn new(source: S, probe: P, config: FinderConfig) -> Self {
        Self {
            source,
            probe,
            config,
        }
    }

    /// Find and rank logo candidates for a raw domain string.
    ///
    /// Accepts the domain with or without scheme, `www.` prefix, or trailing
    /// slash. Always returns an outcome; terminal failures carry a
    /// human-readable reason instead of propagating.
    pub async fn lookup(&self, raw_domain: &str) -> LookupOutcome {
        let domain = normalize_domain(raw_domain);
        match self.ranked_logos(&domain).await {
            Ok(logos) => {
                tracing::debug!(%domain, count = logos.len(), "lookup succeeded");
                LookupOutcome::success(domain, logos)
            }
            Err(err) => {
                tracing::warn!(%domain, error = %err, "lookup failed");
                LookupOutcome::failure(domain, err.to_string())
            }
        }
    }

    async fn ranked_logos(&self, domain: &str) -> Result<Vec<Logo>, LookupError> {
        if domain.is_empty() {
            return Err(LookupError::EmptyDomain);
        }

        let mut candidates = match self.config.strategy {
            LookupStrategy::Scrape => self.scrape_candidates(domain).await?,
            LookupStrategy::Services => extract::service_candidates(domain),
        };
        tracing::debug!(domain, count = candidates.len(), "extracted raw candidates");

        resolve_urls(&mut candidates, &format!("https://{domain}/"));
        for candidate in &mut candidates {
            features::analyze(candidate);
        }

        let measured = self.enrich_dimensions(candidates).await;
        let min = self.config.min_dimension;
        let gated: Vec<Candidate> = measured
            .into_iter()
            .filter(|c| {
                let pass = passes_quality_gate(c, min);
                if !pass {
                    tracing::debug!(url = %c.url, "candidate below dimension gate; dropping");
                }
                pass
            })
            .collect();

        let logos = rank::rank(gated, &self.config.weights, self.config.max_results);
        if logos.is_empty() {
            return Err(LookupError::NoCandidates {
                domain: domain.to_owned(),
            });
        }
        Ok(logos)
    }

    async fn scrape_candidates(&self, domain: &str) -> Result<Vec<Candidate>, LookupError> {
        let url = format!("https://{domain}/");
        let html =
            self.source
                .fetch_html(&url)
                .await
                .map_err(|source| LookupError::SourceUnavailable {
                    domain: domain.to_owned(),
                    source,
                })?;
        Ok(extract::collect_document_candidates(&html))
    }

    /// Probe every candidate lacking dimensions, concurrently.
    ///
    /// Probes have no ordering dependency on each other, so all outstanding
    /// probes run at once up to the configured concurrency; discovery order
    /// is restored afterwards so ranking ties stay deterministic. A failed
    /// probe drops exactly that candidate.
    async fn enrich_dimensions(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let probe = &self.probe;
        let checks = stream::iter(candidates.into_iter().enumerate().map(
            |(seq, mut candidate)| async move {
                if candidate.features.has_dimensions() {
                    return Some((seq, candidate));
                }
                match probe.probe(&candidate.url).await {
                    Some(dims) => {
                        candidate.features.width = Some(dims.width);
                        candidate.features.height = Some(dims.height);
                        Some((seq, candidate))
                    }
                    None => {
                        tracing::debug!(
                            url = %candidate.url,
                            source = %candidate.source,
                            "dimension probe failed; dropping candidate"
                        );
                        None
                    }
                }
            },
        ))
        .buffer_unordered(self.config.probe_concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

        let mut kept: Vec<(usize, Candidate)> = checks.into_iter().flatten().collect();
        kept.sort_by_key(|(seq, _)| *seq);
        kept.into_iter()
            .map(|(_, mut candidate)| {
                features::refresh_aspect_ratio(&mut candidate.features);
                candidate
            })
            .collect()
    }
}

/// Resolve every candidate URL against the page base.
///
/// Data URLs are already absolute; a URL that fails to resolve is left
/// untouched and will fall out at the probe step.
fn resolve_urls(candidates: &mut [Candidate], base: &str) {
    let Ok(base) = Url::parse(base) else {
        return;
    };
    for candidate in candidates {
        if candidate.url.starts_with("data:") {
            continue;
        }
        let raw = candidate.url.replace("&amp;", "&");
        if let Ok(absolute) = base.join(&raw) {
            candidate.url = absolute.to_string();
        }
    }
}

fn passes_quality_gate(candidate: &Candidate, min_dimension: u32) -> bool {
    match (candidate.features.width, candidate.features.height) {
        (Some(w), Some(h)) => w >= min_dimension && h >= min_dimension,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::CandidateKind;

    #[test]
    fn resolve_urls_joins_relative_paths() {
        let mut candidates = vec![Candidate::new(
            "/img/brand.svg",
            CandidateKind::Meta,
            "og:logo",
            10,
        )];
        resolve_urls(&mut candidates, "https://example.com/");
        assert_eq!(candidates[0].url, "https://example.com/img/brand.svg");
    }

    #[test]
    fn resolve_urls_keeps_absolute_and_decodes_entities() {
        let mut candidates = vec![Candidate::new(
            "https://cdn.x.com/l.png?a=1&amp;b=2",
            CandidateKind::Schema,
            "schema.org",
            9,
        )];
        resolve_urls(&mut candidates, "https://example.com/");
        assert_eq!(candidates[0].url, "https://cdn.x.com/l.png?a=1&b=2");
    }

    #[test]
    fn resolve_urls_leaves_data_urls_alone() {
        let url = "data:image/svg+xml,%3Csvg%3E%3C%2Fsvg%3E";
        let mut candidates = vec![Candidate::new(url, CandidateKind::Svg, "inline-svg", 8)];
        resolve_urls(&mut candidates, "https://example.com/");
        assert_eq!(candidates[0].url, url);
    }

    #[test]
    fn quality_gate_requires_both_dimensions_at_threshold() {
        let mut candidate = Candidate::new("https://x.com/a.png", CandidateKind::Meta, "og:image", 8);
        assert!(!passes_quality_gate(&candidate, 100), "unknown dims fail");

        candidate.features.width = Some(100);
        candidate.features.height = Some(100);
        assert!(passes_quality_gate(&candidate, 100));

        candidate.features.height = Some(99);
        assert!(!passes_quality_gate(&candidate, 100));
    }
}
