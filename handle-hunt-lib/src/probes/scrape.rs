//! Page-scrape probes.
//!
//! These platforms serve a profile page for every handle, existing or not,
//! so the status code says nothing. Instead the `<body>` text is searched
//! for a platform-specific string. The strings are fragile by nature and
//! are matched exactly as listed in the built-in platform table.

use super::client::{HeaderStyle, ProbeClient};
use super::html::extract_body_text;
use super::Probe;
use crate::error::HuntError;
use crate::types::ProbeOutcome;
use crate::utils::render_template;
use futures::future::BoxFuture;
use tracing::{debug, warn};

/// How the searched string maps onto availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeRule {
    /// Token only present on pages of existing profiles:
    /// absent => available, present => taken
    Marker(String),
    /// Phrase only present on "no such account" pages:
    /// present => available, absent => taken
    Phrase(String),
}

impl ScrapeRule {
    /// Decide availability from extracted page text.
    pub fn is_available(&self, text: &str) -> bool {
        match self {
            ScrapeRule::Marker(token) => !text.contains(token.as_str()),
            ScrapeRule::Phrase(phrase) => text.contains(phrase.as_str()),
        }
    }
}

/// Probe deciding availability from the text of the profile page.
#[derive(Clone)]
pub struct ScrapeProbe {
    platform: String,
    profile_template: String,
    rule: ScrapeRule,
    headers: HeaderStyle,
    client: ProbeClient,
}

impl ScrapeProbe {
    pub fn new<P: Into<String>, T: Into<String>>(
        platform: P,
        profile_template: T,
        rule: ScrapeRule,
        headers: HeaderStyle,
        client: ProbeClient,
    ) -> Self {
        Self {
            platform: platform.into(),
            profile_template: profile_template.into(),
            rule,
            headers,
            client,
        }
    }

    pub fn rule(&self) -> &ScrapeRule {
        &self.rule
    }

    async fn detect(&self, handle: &str) -> Result<bool, HuntError> {
        let url = render_template(&self.profile_template, handle);
        let page = self.client.fetch_page(&url, self.headers).await?;

        if !page.status.is_success() {
            return Err(HuntError::unexpected_status(url, page.status.as_u16()));
        }

        // An empty body carries no evidence either way
        if page.body.is_empty() {
            return Err(HuntError::empty_body(url));
        }

        let text = extract_body_text(&page.body);
        Ok(self.rule.is_available(&text))
    }
}

impl Probe for ScrapeProbe {
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
                Ok(available) => debug!(platform = %self.platform, handle, available, "scrape probe decided"),
                Err(e) => warn!(
                    platform = %self.platform,
                    handle,
                    timed_out = e.is_timeout(),
                    error = %e,
                    "scrape probe failed"
                ),
            }
            ProbeOutcome::from_detection(detection)
        })
    }
}
