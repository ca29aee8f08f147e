//! Platform probe implementations.
//!
//! A probe checks one handle on one platform with exactly one network
//! retrieval. This module defines the `Probe` capability and its variants:
//! status-code probes, page-scrape probes, and the placeholder used for
//! platforms nobody registered.

use crate::types::{ProbeOutcome, Verdict};
use futures::future::BoxFuture;

/// Shared HTTP client and header styles
pub mod client;

/// `<body>` text extraction
pub mod html;

/// Platform id -> probe mapping and the built-in platform table
pub mod registry;

/// Pages whose markup reveals whether a profile exists
pub mod scrape;

/// Endpoints that answer 404 for missing profiles
pub mod status;

/// Placeholder probe for unknown platforms
pub mod unsupported;

pub use client::{FetchedPage, HeaderStyle, ProbeClient};
pub use html::extract_body_text;
pub use registry::{supported_platforms, PlatformDef, PlatformKind, ProbeRegistry, BUILTIN_PLATFORMS};
pub use scrape::{ScrapeProbe, ScrapeRule};
pub use status::StatusProbe;
pub use unsupported::UnsupportedProbe;

/// A platform-specific availability check.
///
/// Implementors provide [`Probe::probe`]; the provided [`Probe::execute`]
/// turns its outcome into a [`Verdict`]. `probe` must not panic or hang on
/// network trouble: failures are reported as [`ProbeOutcome::Failed`].
pub trait Probe: Send + Sync {
    /// Canonical lowercase identifier of the platform.
    fn platform(&self) -> &str;

    /// Canonical profile URL for `handle`, if the platform has one.
    fn profile_url(&self, handle: &str) -> Option<String>;

    /// Run the platform's retrieval and detection rule.
    fn probe<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, ProbeOutcome>;

    /// Probe `handle` and finalize the outcome into a verdict.
    fn execute<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, Verdict> {
        Box::pin(async move {
            let outcome = self.probe(handle).await;
            Verdict::from_outcome(self.platform(), handle, self.profile_url(handle), outcome)
        })
    }
}
