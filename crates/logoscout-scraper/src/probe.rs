//! Image dimension probe collaborator.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::extract::{extract_attr, parse_dimension_attr};

static SVG_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b[^>]*>").expect("valid regex"));
static VIEWBOX_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Resolves a URL to pixel (or declared-unit) dimensions.
///
/// Failure is an expected outcome, not an error: unreachable resources and
/// undecodable bodies both report `None`, and the pipeline drops exactly
/// that candidate.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Option<ImageDimensions>;
}

/// `reqwest` + `imagesize` probe.
///
/// Bounds its own latency through the client timeout, so one slow image
/// cannot stall the lookup indefinitely. Raster formats are sized from the
/// fetched bytes without a full decode; SVG bodies and `data:image/svg+xml`
/// URLs fall back to the root element's declared size or viewBox.
pub struct HttpImageProbe {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpImageProbe {
    /// # Errors
    ///
    /// Returns the underlying error if the `reqwest::Client` cannot be
    /// constructed.
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
impl ImageProbe for HttpImageProbe {
    async fn probe(&self, url: &str) -> Option<ImageDimensions> {
        if let Some(encoded) = url.strip_prefix("data:image/svg+xml,") {
            let markup = percent_encoding::percent_decode_str(encoded)
                .decode_utf8()
                .ok()?;
            return svg_dimensions(&markup);
        }
        if url.starts_with("data:") {
            return None;
        }

        let response = match self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(url, error = %err, "image probe request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(url, status = response.status().as_u16(), "image probe got non-2xx");
            return None;
        }
        let bytes = response.bytes().await.ok()?;

        if let Ok(size) = imagesize::blob_size(&bytes) {
            return Some(ImageDimensions {
                width: u32::try_from(size.width).ok()?,
                height: u32::try_from(size.height).ok()?,
            });
        }

        // Not a known raster header; SVG bodies still carry a usable size.
        let text = std::str::from_utf8(&bytes).ok()?;
        svg_dimensions(text)
    }
}

/// Size of an SVG document from its root element: explicit width/height
/// attributes first, viewBox extent otherwise.
fn svg_dimensions(markup: &str) -> Option<ImageDimensions> {
    let open_tag = SVG_OPEN_RE.find(markup)?.as_str();

    let width = parse_dimension_attr(extract_attr(open_tag, "width"));
    let height = parse_dimension_attr(extract_attr(open_tag, "height"));
    if let (Some(width), Some(height)) = (width, height) {
        return Some(ImageDimensions { width, height });
    }

    let view_box = extract_attr(open_tag, "viewBox")?;
    let parts: Vec<&str> = VIEWBOX_SPLIT_RE.split(view_box.trim()).collect();
    if parts.len() != 4 {
        return None;
    }
    let width = parse_dimension_attr(Some(parts[2].to_string()))?;
    let height = parse_dimension_attr(Some(parts[3].to_string()))?;
    Some(ImageDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_dimensions_prefers_explicit_attrs() {
        let markup = r#"<svg width="300" height="120" viewBox="0 0 24 24"></svg>"#;
        assert_eq!(
            svg_dimensions(markup),
            Some(ImageDimensions {
                width: 300,
                height: 120
            })
        );
    }

    #[test]
    fn svg_dimensions_falls_back_to_viewbox() {
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 60"><path d="M0 0"/></svg>"#;
        assert_eq!(
            svg_dimensions(markup),
            Some(ImageDimensions {
                width: 200,
                height: 60
            })
        );
    }

    #[test]
    fn svg_dimensions_accepts_comma_separated_viewbox() {
        let markup = r#"<svg viewBox="0,0,128,128"></svg>"#;
        assert_eq!(
            svg_dimensions(markup),
            Some(ImageDimensions {
                width: 128,
                height: 128
            })
        );
    }

    #[test]
    fn svg_without_size_information_reports_none() {
        assert_eq!(svg_dimensions("<svg><rect/></svg>"), None);
        assert_eq!(svg_dimensions("not markup at all"), None);
    }

    #[tokio::test]
    async fn data_url_svg_is_sized_without_network() {
        let probe = HttpImageProbe::new(1, "test/1.0").unwrap();
        let url = "data:image/svg+xml,%3Csvg%20width%3D%22150%22%20height%3D%22150%22%3E%3C%2Fsvg%3E";
        assert_eq!(
            probe.probe(url).await,
            Some(ImageDimensions {
                width: 150,
                height: 150
            })
        );
    }

    #[tokio::test]
    async fn non_svg_data_url_fails_the_probe() {
        let probe = HttpImageProbe::new(1, "test/1.0").unwrap();
        assert_eq!(probe.probe("data:image/gif;base64,R0lGOD").await, None);
    }
}
