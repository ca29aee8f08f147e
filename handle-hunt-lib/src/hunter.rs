//! Main handle hunter implementation.
//!
//! This module provides the `HandleHunter` that fans a handle out to one
//! probe per requested platform, runs them concurrently, and collects one
//! verdict per request entry.

use crate::error::HuntError;
use crate::probes::{Probe, ProbeClient, ProbeRegistry};
use crate::types::{HuntConfig, ProbeOutcome, Verdict};
use crate::utils::{normalize_platform_id, validate_handle};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Slack on top of the probe timeout before the engine gives up on a task.
const PROBE_DEADLINE_BUFFER: Duration = Duration::from_secs(2);

/// Availability engine that coordinates probe execution.
///
/// Holds only immutable configuration and the probe registry, so one
/// instance can serve any number of concurrent requests.
///
/// # Example
///
/// ```rust,no_run
/// use handle_hunt_lib::HandleHunter;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let hunter = HandleHunter::new()?;
///     let platforms = vec!["github".to_string(), "tiktok".to_string()];
///     for verdict in hunter.check_all("alice", &platforms).await? {
///         println!("{}: {:?}", verdict.platform(), verdict.available());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct HandleHunter {
    /// Configuration settings for this hunter instance
    config: HuntConfig,
    /// Platform id -> probe
    registry: Arc<ProbeRegistry>,
}

impl HandleHunter {
    /// Create a hunter with default configuration and the built-in platforms.
    pub fn new() -> Result<Self, HuntError> {
        Self::with_config(HuntConfig::default())
    }

    /// Create a hunter with custom configuration and the built-in platforms.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_hunt_lib::{HandleHunter, HuntConfig};
    /// use std::time::Duration;
    ///
    /// let config = HuntConfig::default()
    ///     .with_concurrency(20)
    ///     .with_timeout(Duration::from_secs(5));
    ///
    /// let hunter = HandleHunter::with_config(config).unwrap();
    /// assert!(hunter.supported_platforms().contains(&"github".to_string()));
    /// ```
    pub fn with_config(config: HuntConfig) -> Result<Self, HuntError> {
        let client = ProbeClient::new(&config)?;
        let registry = ProbeRegistry::with_builtin(client);
        Ok(Self::with_registry(config, registry))
    }

    /// Create a hunter over a caller-built registry.
    pub fn with_registry(config: HuntConfig, registry: ProbeRegistry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
        }
    }

    /// Get the current configuration for this hunter.
    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProbeRegistry {
        &self.registry
    }

    /// Registered platform ids, in registration order.
    pub fn supported_platforms(&self) -> Vec<String> {
        self.registry.supported()
    }

    /// Platforms to check when the caller names none.
    ///
    /// The configured default list if any, else every registered platform.
    pub fn default_platforms(&self) -> Vec<String> {
        self.config
            .platforms
            .clone()
            .unwrap_or_else(|| self.registry.supported())
    }

    /// Check one handle on one platform.
    pub async fn check_platform(&self, handle: &str, platform: &str) -> Result<Verdict, HuntError> {
        validate_handle(handle)?;
        let probe = self.registry.resolve(&normalize_platform_id(platform));
        Ok(self.run_isolated(probe, handle.to_string()).await)
    }

    /// Check one handle on every listed platform concurrently.
    ///
    /// Returns exactly one verdict per entry of `platforms`, duplicates
    /// included, in input order (callers should not rely on the order).
    /// Probe failures never fail the batch; only a malformed handle does.
    pub async fn check_all(
        &self,
        handle: &str,
        platforms: &[String],
    ) -> Result<Vec<Verdict>, HuntError> {
        validate_handle(handle)?;
        let start_time = Instant::now();

        let tasks = platforms.iter().map(|platform| {
            let probe = self.registry.resolve(&normalize_platform_id(platform));
            self.run_isolated(probe, handle.to_string())
        });
        let verdicts = futures::future::join_all(tasks).await;

        info!(
            handle,
            platforms = verdicts.len(),
            available = verdicts.iter().filter(|v| v.available() == Some(true)).count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "handle check completed"
        );

        Ok(verdicts)
    }

    /// Check platforms and yield verdicts as they complete.
    ///
    /// At most `config.concurrency` probes run at once. The stream ends
    /// after exactly one verdict per entry of `platforms`.
    pub fn check_all_stream(
        &self,
        handle: &str,
        platforms: &[String],
    ) -> Result<Pin<Box<dyn Stream<Item = Verdict> + Send + 'static>>, HuntError> {
        validate_handle(handle)?;

        let hunter = self.clone();
        let handle = handle.to_string();
        let probes: Vec<Arc<dyn Probe>> = platforms
            .iter()
            .map(|platform| self.registry.resolve(&normalize_platform_id(platform)))
            .collect();

        let stream = futures::stream::iter(probes)
            .map(move |probe| {
                let hunter = hunter.clone();
                let handle = handle.clone();
                async move { hunter.run_isolated(probe, handle).await }
            })
            .buffer_unordered(self.config.concurrency.max(1));

        Ok(Box::pin(stream))
    }

    /// Run one probe on its own task.
    ///
    /// A panic or an overrun of the probe deadline becomes this platform's
    /// failed verdict; sibling probes are unaffected.
    async fn run_isolated(&self, probe: Arc<dyn Probe>, handle: String) -> Verdict {
        let platform = probe.platform().to_string();
        let profile_url = probe.profile_url(&handle);
        let deadline = self.config.timeout + PROBE_DEADLINE_BUFFER;

        let task_probe = Arc::clone(&probe);
        let task_handle = handle.clone();
        let task = tokio::spawn(async move { task_probe.execute(&task_handle).await });

        match tokio::time::timeout(deadline, task).await {
            Ok(Ok(verdict)) => {
                debug!(platform = %verdict.platform(), available = ?verdict.available(), "probe finished");
                verdict
            }
            Ok(Err(join_error)) => {
                let error = HuntError::internal(format!("probe task failed: {}", join_error));
                warn!(platform = %platform, handle = %handle, error = %error, "probe task failed");
                Verdict::from_outcome(platform, handle, profile_url, ProbeOutcome::failed(error))
            }
            Err(_) => {
                // Dropping the JoinHandle detaches the task; it ends with its own client timeout
                let error = HuntError::timeout(format!("probe {}", platform), deadline);
                warn!(platform = %platform, handle = %handle, error = %error, "probe overran deadline");
                Verdict::from_outcome(platform, handle, profile_url, ProbeOutcome::failed(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::UnsupportedProbe;
    use crate::types::ERROR_MESSAGE;
    use futures::future::BoxFuture;

    /// Probe with a fixed outcome and optional delay.
    struct FixedProbe {
        platform: &'static str,
        outcome: ProbeOutcome,
        delay: Duration,
    }

    impl Probe for FixedProbe {
        fn platform(&self) -> &str {
            self.platform
        }

        fn profile_url(&self, handle: &str) -> Option<String> {
            Some(format!("https://{}.test/{}", self.platform, handle))
        }

        fn probe<'a>(&'a self, _handle: &'a str) -> BoxFuture<'a, ProbeOutcome> {
            Box::pin(async move {
                tokio::time::sleep(self.delay).await;
                self.outcome.clone()
            })
        }
    }

    /// Probe that panics, standing in for a programming defect.
    struct PanickingProbe;

    impl Probe for PanickingProbe {
        fn platform(&self) -> &str {
            "broken"
        }

        fn profile_url(&self, handle: &str) -> Option<String> {
            Some(format!("https://broken.test/{}", handle))
        }

        fn probe<'a>(&'a self, handle: &'a str) -> BoxFuture<'a, ProbeOutcome> {
            Box::pin(async move {
                if handle.is_empty() {
                    return ProbeOutcome::Unsupported;
                }
                panic!("probe defect")
            })
        }
    }

    fn fixed(platform: &'static str, outcome: ProbeOutcome) -> Arc<dyn Probe> {
        Arc::new(FixedProbe {
            platform,
            outcome,
            delay: Duration::ZERO,
        })
    }

    fn test_hunter(timeout: Duration) -> HandleHunter {
        let mut registry = ProbeRegistry::empty();
        registry.register(fixed("alpha", ProbeOutcome::Available));
        registry.register(fixed("beta", ProbeOutcome::Taken));
        registry.register(fixed("gamma", ProbeOutcome::failed("boom")));
        registry.register(Arc::new(PanickingProbe));
        registry.register(Arc::new(FixedProbe {
            platform: "slow",
            outcome: ProbeOutcome::Taken,
            delay: Duration::from_secs(3600),
        }));
        HandleHunter::with_registry(HuntConfig::default().with_timeout(timeout), registry)
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_platform_list() {
        let hunter = test_hunter(Duration::from_secs(1));
        let verdicts = hunter.check_all("alice", &[]).await.unwrap();
        assert!(verdicts.is_empty());
    }

    #[tokio::test]
    async fn test_one_verdict_per_entry_including_duplicates() {
        let hunter = test_hunter(Duration::from_secs(1));
        let verdicts = hunter
            .check_all("alice", &ids(&["alpha", "alpha", " BETA ", "nope"]))
            .await
            .unwrap();

        assert_eq!(verdicts.len(), 4);
        assert_eq!(verdicts[0].available(), Some(true));
        assert_eq!(verdicts[1].available(), Some(true));
        assert_eq!(verdicts[2].platform(), "beta");
        assert_eq!(verdicts[2].available(), Some(false));
        assert!(verdicts[3].is_unsupported());
        assert_eq!(verdicts[3].message(), "nope is not supported yet!");
    }

    #[tokio::test]
    async fn test_panicking_probe_is_isolated() {
        let hunter = test_hunter(Duration::from_secs(1));
        let verdicts = hunter
            .check_all("alice", &ids(&["alpha", "broken", "beta"]))
            .await
            .unwrap();

        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[0].available(), Some(true));
        assert_eq!(verdicts[1].platform(), "broken");
        assert_eq!(verdicts[1].available(), None);
        assert!(!verdicts[1].verified());
        assert_eq!(verdicts[1].message(), ERROR_MESSAGE);
        assert_eq!(verdicts[1].profile_url(), Some("https://broken.test/alice"));
        assert_eq!(verdicts[2].available(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_probe_times_out_without_affecting_siblings() {
        let hunter = test_hunter(Duration::from_secs(1));
        let verdicts = hunter
            .check_all("alice", &ids(&["slow", "alpha", "gamma"]))
            .await
            .unwrap();

        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[0].available(), None);
        assert!(!verdicts[0].verified());
        assert_eq!(verdicts[1].available(), Some(true));
        assert!(verdicts[1].verified());
        assert_eq!(verdicts[2].available(), None);
        assert_eq!(verdicts[2].message(), ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_handle_is_batch_error() {
        let hunter = test_hunter(Duration::from_secs(1));
        let err = hunter.check_all("", &ids(&["alpha"])).await.unwrap_err();
        assert!(err.is_invalid_input());

        let err = hunter.check_all("bad handle", &ids(&["alpha"])).await.unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_handle_casing_preserved() {
        let hunter = test_hunter(Duration::from_secs(1));
        let verdict = hunter.check_platform("AliCe", "ALPHA").await.unwrap();
        assert_eq!(verdict.handle(), "AliCe");
        assert_eq!(verdict.platform(), "alpha");
        assert_eq!(verdict.profile_url(), Some("https://alpha.test/AliCe"));
    }

    #[tokio::test]
    async fn test_stream_yields_every_entry() {
        let hunter = test_hunter(Duration::from_secs(1));
        let stream = hunter
            .check_all_stream("alice", &ids(&["alpha", "beta", "broken", "x", "alpha"]))
            .unwrap();
        let verdicts: Vec<Verdict> = stream.collect().await;

        assert_eq!(verdicts.len(), 5);
        let mut platforms: Vec<&str> = verdicts.iter().map(|v| v.platform()).collect();
        platforms.sort();
        assert_eq!(platforms, vec!["alpha", "alpha", "beta", "broken", "x"]);
    }

    #[test]
    fn test_default_platforms() {
        let mut registry = ProbeRegistry::empty();
        registry.register(Arc::new(UnsupportedProbe::new("one")));
        registry.register(Arc::new(UnsupportedProbe::new("two")));

        let hunter = HandleHunter::with_registry(HuntConfig::default(), registry.clone());
        assert_eq!(hunter.default_platforms(), ids(&["one", "two"]));

        let hunter = HandleHunter::with_registry(
            HuntConfig::default().with_platforms(ids(&["two"])),
            registry,
        );
        assert_eq!(hunter.default_platforms(), ids(&["two"]));
    }
}
