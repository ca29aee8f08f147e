//! Shared HTTP client used by every probe.
//!
//! Wraps a single `reqwest::Client` (connection pool shared across probes)
//! together with the browser-like header set and the per-probe deadline.

use crate::error::HuntError;
use crate::types::HuntConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Which headers a probe sends with its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// User-Agent, Accept and Accept-Language of a desktop browser
    Browser,
    /// Whatever the HTTP client sends on its own
    Plain,
}

/// A fetched page: final status plus the decoded body.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client for platform probes.
#[derive(Clone)]
pub struct ProbeClient {
    /// Pooled HTTP client, no default headers of its own
    http_client: reqwest::Client,
    /// Headers attached for `HeaderStyle::Browser`
    browser_headers: HeaderMap,
    /// Deadline for one retrieval (request plus body)
    timeout: Duration,
}

impl ProbeClient {
    /// Create a probe client from the hunt configuration.
    pub fn new(config: &HuntConfig) -> Result<Self, HuntError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                HuntError::network_with_source("Failed to create probe HTTP client", e.to_string())
            })?;

        let mut browser_headers = HeaderMap::new();
        browser_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                HuntError::config(format!("Invalid user agent '{}': {}", config.user_agent, e))
            })?,
        );
        browser_headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        browser_headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );

        Ok(Self {
            http_client,
            browser_headers,
            timeout: config.timeout,
        })
    }

    /// The per-retrieval deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request(&self, url: &str, headers: HeaderStyle) -> reqwest::RequestBuilder {
        let request = self.http_client.get(url);
        match headers {
            HeaderStyle::Browser => request.headers(self.browser_headers.clone()),
            HeaderStyle::Plain => request,
        }
    }

    /// GET `url` and return only the status code.
    pub async fn fetch_status(
        &self,
        url: &str,
        headers: HeaderStyle,
    ) -> Result<StatusCode, HuntError> {
        let result = tokio::time::timeout(self.timeout, self.request(url, headers).send()).await;

        match result {
            Ok(Ok(response)) => {
                debug!(url, status = %response.status(), "probe response");
                Ok(response.status())
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(HuntError::timeout(format!("GET {}", url), self.timeout)),
        }
    }

    /// GET `url` and read the full body as text.
    pub async fn fetch_page(
        &self,
        url: &str,
        headers: HeaderStyle,
    ) -> Result<FetchedPage, HuntError> {
        let retrieval = async {
            let response = self.request(url, headers).send().await?;
            let status = response.status();
            debug!(url, status = %status, "probe response");
            let body = response.text().await?;
            Ok::<_, HuntError>(FetchedPage { status, body })
        };

        match tokio::time::timeout(self.timeout, retrieval).await {
            Ok(result) => result,
            Err(_) => Err(HuntError::timeout(format!("GET {}", url), self.timeout)),
        }
    }
}
