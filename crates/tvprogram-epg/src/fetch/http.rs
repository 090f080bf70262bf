//! `HttpGuideSource` - reqwest-backed guide downloader.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::source::LocalGuideSource;
use crate::error::FetchError;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloads gzip-compressed guides over HTTP.
#[derive(Debug)]
pub struct HttpGuideSource {
    /// HTTP client (transparent decompression disabled; payloads are `.gz` files).
    http_client: Client,
}

/// Builder for `HttpGuideSource`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct HttpGuideSourceBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl HttpGuideSourceBuilder {
    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the whole-request timeout (default: 60s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the source.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<HttpGuideSource> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpGuideSource { http_client })
    }
}

impl HttpGuideSource {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> HttpGuideSourceBuilder {
        HttpGuideSourceBuilder::default()
    }
}

impl LocalGuideSource for HttpGuideSource {
    #[instrument(skip_all, fields(source_id = %source_id))]
    async fn download(&self, source_id: &str, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            source_id: source_id.to_owned(),
            url: url.to_owned(),
            source,
        })?;

        tracing::debug!(%parsed, "Downloading guide");
        let response = self
            .http_client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                source_id: source_id.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                source_id: source_id.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Http {
            source_id: source_id.to_owned(),
            source,
        })?;
        tracing::debug!(body_len = body.len(), "Guide downloaded");

        Ok(body.to_vec())
    }
}
