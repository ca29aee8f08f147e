//! Core data types for handle availability checking.
//!
//! This module defines the verdict produced for every requested platform,
//! the outcome a probe hands back before finalization, and the configuration
//! shared by the engine and its probes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message used when a probe decided the handle is free.
pub const AVAILABLE_MESSAGE: &str = "Username is available for use";

/// Message used when a probe decided the handle is registered.
pub const TAKEN_MESSAGE: &str = "Username is already taken";

/// Message used whenever a probe could not reach a verdict.
pub const ERROR_MESSAGE: &str = "Unable to verify availability due to an error";

/// Browser identity sent by probes that need to look like a real visitor.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// What a single probe concluded, before it becomes a [`Verdict`].
///
/// Probes never return errors to the engine. Anything that went wrong is
/// folded into `Failed`, which finalizes to an `unknown` verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The platform signalled "no such profile"
    Available,
    /// The platform served an existing profile
    Taken,
    /// No probe is registered for the requested platform
    Unsupported,
    /// Transport or detection failed; the reason is kept for logging only
    Failed { reason: String },
}

impl ProbeOutcome {
    /// Build a failed outcome from anything printable.
    pub fn failed<R: ToString>(reason: R) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }

    /// Map a detection result onto an outcome.
    ///
    /// `Ok(true)` means available, `Ok(false)` taken, `Err` failed.
    pub fn from_detection<E: ToString>(detection: Result<bool, E>) -> Self {
        match detection {
            Ok(true) => Self::Available,
            Ok(false) => Self::Taken,
            Err(e) => Self::failed(e),
        }
    }
}

/// Result of checking one handle on one platform.
///
/// Built exactly once from a [`ProbeOutcome`] via [`Verdict::from_outcome`];
/// fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Canonical lowercase platform identifier
    platform: String,

    /// The handle as requested, casing untouched
    handle: String,

    /// Profile URL that was probed; `null` for unsupported platforms
    profile_url: Option<String>,

    /// Whether the handle is free to register.
    /// - `Some(true)`: available
    /// - `Some(false)`: taken
    /// - `None`: could not be determined
    available: Option<bool>,

    /// Whether the probe completed its request and applied its rule
    verified: bool,

    /// Human-readable explanation, never empty
    message: String,
}

impl Verdict {
    /// Finalize a probe outcome into a verdict.
    ///
    /// This is the only place default messages are chosen, so an error
    /// message can never be replaced by an availability statement.
    pub fn from_outcome(
        platform: impl Into<String>,
        handle: impl Into<String>,
        profile_url: Option<String>,
        outcome: ProbeOutcome,
    ) -> Self {
        let platform = platform.into();
        let handle = handle.into();

        let (profile_url, available, verified, message) = match outcome {
            ProbeOutcome::Available => (profile_url, Some(true), true, AVAILABLE_MESSAGE.to_string()),
            ProbeOutcome::Taken => (profile_url, Some(false), true, TAKEN_MESSAGE.to_string()),
            ProbeOutcome::Unsupported => {
                let message = format!("{} is not supported yet!", platform);
                (None, None, true, message)
            }
            ProbeOutcome::Failed { .. } => (profile_url, None, false, ERROR_MESSAGE.to_string()),
        };

        Self {
            platform,
            handle,
            profile_url,
            available,
            verified,
            message,
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn profile_url(&self) -> Option<&str> {
        self.profile_url.as_deref()
    }

    pub fn available(&self) -> Option<bool> {
        self.available
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the verdict is a placeholder for an unknown platform.
    pub fn is_unsupported(&self) -> bool {
        self.verified && self.available.is_none()
    }
}

/// Configuration options for handle checking operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntConfig {
    /// Deadline for each probe's network retrieval
    /// Default: 8 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub timeout: Duration,

    /// Maximum number of probes in flight for streaming checks
    /// Default: 10, Range: 1-100
    pub concurrency: usize,

    /// User-Agent sent by probes that use browser headers
    pub user_agent: String,

    /// Platforms to check when a request names none.
    /// If None, every registered platform is checked.
    pub platforms: Option<Vec<String>>,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(8),
            concurrency: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            platforms: None,
        }
    }
}

impl HuntConfig {
    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set streaming concurrency, capped at 100.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Override the browser User-Agent.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the default platform list.
    pub fn with_platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = Some(platforms);
        self
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeOutcome::Available => write!(f, "available"),
            ProbeOutcome::Taken => write!(f, "taken"),
            ProbeOutcome::Unsupported => write!(f, "unsupported"),
            ProbeOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
