//! Placeholder probe for platforms without a registered implementation.

use super::Probe;
use crate::types::ProbeOutcome;
use futures::future::BoxFuture;

/// Classifies a platform as unsupported without touching the network.
#[derive(Debug, Clone)]
pub struct UnsupportedProbe {
    platform: String,
}

impl UnsupportedProbe {
    pub fn new<P: Into<String>>(platform: P) -> Self {
        Self {
            platform: platform.into(),
        }
    }
}

impl Probe for UnsupportedProbe {
    fn platform(&self) -> &str {
        &self.platform
    }

    fn profile_url(&self, _handle: &str) -> Option<String> {
        None
    }

    fn probe<'a>(&'a self, _handle: &'a str) -> BoxFuture<'a, ProbeOutcome> {
        Box::pin(async { ProbeOutcome::Unsupported })
    }
}
