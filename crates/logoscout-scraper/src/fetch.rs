//! HTML page source collaborator.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

const BROWSER_FALLBACK_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const HTML_FETCH_ATTEMPTS: usize = 3;
const HTML_FETCH_BACKOFF_MS: [u64; 3] = [0, 300, 900];

/// Supplies raw HTML for a URL. The pipeline is agnostic to how the body is
/// obtained; swapping the implementation swaps the transport.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// `reqwest`-backed page source with retry and a browser-UA fallback.
pub struct HttpPageSource {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpPageSource {
    /// # Errors
    ///
    /// Returns the underlying error if the `reqwest::Client` cannot be
    /// constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    /// Fetch the HTML body of a URL, trying the configured user-agent first
    /// and then the browser fallback UA, across a short backoff schedule.
    /// Returns the first usable body.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let mut last_error: Option<reqwest::Error> = None;

        for attempt in 0..HTML_FETCH_ATTEMPTS {
            if let Some(delay_ms) = HTML_FETCH_BACKOFF_MS.get(attempt).copied() {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }

            let mut user_agents = vec![self.user_agent.clone()];
            if self.user_agent != BROWSER_FALLBACK_UA {
                user_agents.push(BROWSER_FALLBACK_UA.to_string());
            }

            for ua in user_agents {
                let response = match self
                    .client
                    .get(url)
                    .header(reqwest::header::USER_AGENT, &ua)
                    .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
                    .send()
                    .await
                {
                    Ok(resp) => resp,
                    Err(err) => {
                        last_error = Some(err);
                        continue;
                    }
                };

                if !response.status().is_success() {
                    continue;
                }
                let Ok(body) = response.text().await else {
                    continue;
                };
                if is_usable_html(&body) {
                    return Ok(body);
                }
            }

            if let Some(err) = &last_error {
                tracing::debug!(url, attempt, error = %err, "fetch_html attempt failed; retrying");
            }
        }

        // Every attempt returned non-2xx or unusable HTML — surface the
        // failure so callers can distinguish "unreachable" from "no logos".
        match last_error {
            Some(source) => Err(FetchError::Http {
                url: url.to_owned(),
                source,
            }),
            None => Err(FetchError::AllAttemptsFailed {
                url: url.to_owned(),
            }),
        }
    }
}

fn is_usable_html(body: &str) -> bool {
    !body.trim().is_empty() && !looks_like_bot_challenge(body)
}

/// Anti-bot interstitials serve HTML with no real page content; treating
/// them as a fetch failure lets the retry ladder run instead of extracting
/// from challenge markup.
fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");
    let has_cf_chl = lowered.contains("cf-chl-");

    has_cloudflare_banner
        || has_challenge_platform
        || (has_just_a_moment && has_cookie_gate)
        || (has_just_a_moment && has_cf_chl)
}
