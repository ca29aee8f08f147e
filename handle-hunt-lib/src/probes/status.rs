//! Status-code probes.
//!
//! These platforms answer a per-user URL with 404 when no such user exists.
//! Any 2xx means the profile exists; every other status, like every
//! transport error, leaves the verdict undecided.

use super::client::{HeaderStyle, ProbeClient};
use super::Probe;
use crate::error::HuntError;
use crate::types::ProbeOutcome;
use crate::utils::render_template;
use futures::future::BoxFuture;
use reqwest::StatusCode;
use tracing::{debug, warn};

/// Probe deciding availability from the HTTP status of one GET.
#[derive(Clone)]
pub struct StatusProbe {
    platform: String,
    /// Profile URL reported in the verdict, `{handle}` placeholder
    profile_template: String,
    /// URL actually requested, `{handle}` placeholder
    endpoint_template: String,
    headers: HeaderStyle,
    client: ProbeClient,
}

impl StatusProbe {
    /// Create a probe that requests the profile URL itself.
    pub fn new<P: Into<String>, T: Into<String>>(
        platform: P,
        profile_template: T,
        headers: HeaderStyle,
        client: ProbeClient,
    ) -> Self {
        let profile_template = profile_template.into();
        Self {
            platform: platform.into(),
            endpoint_template: profile_template.clone(),
            profile_template,
            headers,
            client,
        }
    }

    /// Request a separate endpoint (e.g. a REST API) instead of the profile page.
    pub fn with_endpoint<T: Into<String>>(mut self, endpoint_template: T) -> Self {
        self.endpoint_template = endpoint_template.into();
        self
    }

    /// URL requested for `handle`.
    pub fn endpoint_url(&self, handle: &str) -> String {
        render_template(&self.endpoint_template, handle)
    }

    async fn detect(&self, handle: &str) -> Result<bool, HuntError> {
        let url = self.endpoint_url(handle);
        let status = self.client.fetch_status(&url, self.headers).await?;
        classify_status(&url, status)
    }
}

/// Map a status code onto availability: 404 free, 2xx taken, else error.
pub fn classify_status(url: &str, status: StatusCode) -> Result<bool, HuntError> {
    if status == StatusCode::NOT_FOUND {
        Ok(true)
    } else if status.is_success() {
        Ok(false)
    } else {
        Err(HuntError::unexpected_status(url, status.as_u16()))
    }
}

impl Probe for StatusProbe {
    fn platform(&self) -> &str {
        &self.platform
    }

    fn profile_url(&self, handle: &str) -> Option<String> {
        Some(render_template(&self.profile_template, handle))
    }

    fn probe<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, ProbeOutcome> {
        Box::pin(async move {
            let detection = self.detect(handle).await;
            match &detection {
                Ok(available) => debug!(platform = %self.platform, handle, available, "status probe decided"),
                Err(e) => warn!(
                    platform = %self.platform,
                    handle,
                    timed_out = e.is_timeout(),
                    error = %e,
                    "status probe failed"
                ),
            }
            ProbeOutcome::from_detection(detection)
        })
    }
}
