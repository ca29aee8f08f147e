//! Platform registry mappings.
//!
//! This module holds the built-in platform table (which transport and which
//! detection rule each platform uses) and the `ProbeRegistry` that resolves
//! a platform identifier to a probe instance.

use super::client::{HeaderStyle, ProbeClient};
use super::scrape::{ScrapeProbe, ScrapeRule};
use super::status::StatusProbe;
use super::unsupported::UnsupportedProbe;
use super::Probe;
use crate::utils::normalize_platform_id;
use std::collections::HashMap;
use std::sync::Arc;

/// Detection strategy of a built-in platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// GET `endpoint`, 404 => available, 2xx => taken
    Status { endpoint: &'static str },
    /// GET the profile page, marker absent => available
    Marker { token: &'static str },
    /// GET the profile page, phrase present => available
    Phrase { phrase: &'static str },
}

/// One row of the built-in platform table.
#[derive(Debug, Clone, Copy)]
pub struct PlatformDef {
    pub id: &'static str,
    /// Profile URL with a `{handle}` placeholder
    pub profile: &'static str,
    pub kind: PlatformKind,
    pub headers: HeaderStyle,
}

/// Built-in platforms, in the order they are reported as supported.
pub const BUILTIN_PLATFORMS: &[PlatformDef] = &[
    PlatformDef {
        id: "github",
        profile: "https://github.com/{handle}",
        kind: PlatformKind::Status {
            endpoint: "https://api.github.com/users/{handle}",
        },
        headers: HeaderStyle::Browser,
    },
    PlatformDef {
        id: "instagram",
        profile: "https://www.instagram.com/{handle}",
        kind: PlatformKind::Marker { token: "\"user_id\"" },
        headers: HeaderStyle::Browser,
    },
    PlatformDef {
        id: "facebook",
        profile: "https://web.facebook.com/{handle}",
        kind: PlatformKind::Marker { token: "\"userID\"" },
        headers: HeaderStyle::Plain,
    },
    PlatformDef {
        id: "youtube",
        profile: "https://www.youtube.com/@{handle}",
        kind: PlatformKind::Status {
            endpoint: "https://www.youtube.com/@{handle}",
        },
        headers: HeaderStyle::Plain,
    },
    PlatformDef {
        id: "threads",
        profile: "https://www.threads.net/@{handle}",
        kind: PlatformKind::Marker { token: "\"user_id\"" },
        headers: HeaderStyle::Plain,
    },
    PlatformDef {
        id: "snapchat",
        profile: "https://www.snapchat.com/add/{handle}",
        kind: PlatformKind::Status {
            endpoint: "https://www.snapchat.com/add/{handle}",
        },
        headers: HeaderStyle::Plain,
    },
    PlatformDef {
        id: "tiktok",
        profile: "https://www.tiktok.com/@{handle}",
        kind: PlatformKind::Marker { token: "\"uniqueId\"" },
        headers: HeaderStyle::Plain,
    },
    PlatformDef {
        id: "twitter",
        profile: "https://twitter.com/{handle}",
        kind: PlatformKind::Phrase {
            phrase: "This account doesn’t exist",
        },
        headers: HeaderStyle::Browser,
    },
];

/// Identifiers of the built-in platforms, in table order.
pub fn supported_platforms() -> Vec<&'static str> {
    BUILTIN_PLATFORMS.iter().map(|def| def.id).collect()
}

impl PlatformDef {
    /// Instantiate the probe described by this row.
    pub fn build(&self, client: ProbeClient) -> Arc<dyn Probe> {
        match self.kind {
            PlatformKind::Status { endpoint } => Arc::new(
                StatusProbe::new(self.id, self.profile, self.headers, client)
                    .with_endpoint(endpoint),
            ),
            PlatformKind::Marker { token } => Arc::new(ScrapeProbe::new(
                self.id,
                self.profile,
                ScrapeRule::Marker(token.to_string()),
                self.headers,
                client,
            )),
            PlatformKind::Phrase { phrase } => Arc::new(ScrapeProbe::new(
                self.id,
                self.profile,
                ScrapeRule::Phrase(phrase.to_string()),
                self.headers,
                client,
            )),
        }
    }
}

/// Maps platform identifiers to probes.
///
/// Immutable once handed to the engine; shared behind an `Arc`.
#[derive(Clone, Default)]
pub struct ProbeRegistry {
    probes: HashMap<String, Arc<dyn Probe>>,
    /// Registration order, reported by `supported()`
    order: Vec<String>,
}

impl ProbeRegistry {
    /// A registry with no platforms; every id resolves to unsupported.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding every built-in platform.
    pub fn with_builtin(client: ProbeClient) -> Self {
        let mut registry = Self::empty();
        for def in BUILTIN_PLATFORMS {
            registry.register(def.build(client.clone()));
        }
        registry
    }

    /// Register a probe under its own platform id.
    ///
    /// Re-registering an id replaces the probe but keeps its position.
    pub fn register(&mut self, probe: Arc<dyn Probe>) {
        let id = normalize_platform_id(probe.platform());
        if !self.probes.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.probes.insert(id, probe);
    }

    /// Resolve a normalized platform id.
    ///
    /// Unknown ids get an [`UnsupportedProbe`]; resolution never fails.
    pub fn resolve(&self, platform_id: &str) -> Arc<dyn Probe> {
        match self.probes.get(platform_id) {
            Some(probe) => Arc::clone(probe),
            None => Arc::new(UnsupportedProbe::new(platform_id)),
        }
    }

    /// Whether a probe is registered for the id.
    pub fn is_supported(&self, platform_id: &str) -> bool {
        self.probes.contains_key(platform_id)
    }

    /// Registered platform ids in registration order.
    pub fn supported(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
