//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and `HH_*`
//! environment variables, and merging configurations with proper
//! precedence rules.

use crate::error::HuntError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// HTTP server settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

/// Default values that map to `HuntConfig` fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Per-probe timeout (as string, e.g., "5s", "1m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Concurrency for streaming checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Platforms checked when a request names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,

    /// Browser User-Agent override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Listen address, e.g. "127.0.0.1:3000"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
}

/// Configuration discovery and loading functionality.
#[derive(Debug, Default)]
pub struct ConfigManager;

impl ConfigManager {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, HuntError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(HuntError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            HuntError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config, then the home directory file, then the working directory
    /// file; later files override earlier ones field by field. A discovered
    /// file that fails to parse or validate is an error.
    pub fn discover_and_load(&self) -> Result<FileConfig, HuntError> {
        let mut merged_config = FileConfig::default();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            let config = self.load_file(&path)?;
            debug!(path = %path.display(), "loaded config file");
            merged_config = self.merge_configs(merged_config, config);
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./handle-hunt.toml", "./.handle-hunt.toml"];

        candidates
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    /// Get the global configuration file path in the home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let candidates = [".handle-hunt.toml", "handle-hunt.toml"];

        candidates
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|path| path.exists())
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("handle-hunt").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations; values from `higher` win.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.timeout.is_some() {
                        lower_defaults.timeout = higher_defaults.timeout;
                    }
                    if higher_defaults.concurrency.is_some() {
                        lower_defaults.concurrency = higher_defaults.concurrency;
                    }
                    if higher_defaults.platforms.is_some() {
                        lower_defaults.platforms = higher_defaults.platforms;
                    }
                    if higher_defaults.user_agent.is_some() {
                        lower_defaults.user_agent = higher_defaults.user_agent;
                    }
                    Some(lower_defaults)
                }
                (lower_defaults, higher_defaults) => higher_defaults.or(lower_defaults),
            },
            server: match (lower.server, higher.server) {
                (Some(mut lower_server), Some(higher_server)) => {
                    if higher_server.bind.is_some() {
                        lower_server.bind = higher_server.bind;
                    }
                    Some(lower_server)
                }
                (lower_server, higher_server) => higher_server.or(lower_server),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), HuntError> {
        if let Some(defaults) = &config.defaults {
            if let Some(concurrency) = defaults.concurrency {
                if concurrency == 0 || concurrency > 100 {
                    return Err(HuntError::config("Concurrency must be between 1 and 100"));
                }
            }

            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(HuntError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            if let Some(platforms) = &defaults.platforms {
                if platforms.iter().any(|p| p.trim().is_empty()) {
                    return Err(HuntError::config("Platform names cannot be empty"));
                }
            }

            if let Some(user_agent) = &defaults.user_agent {
                if user_agent.trim().is_empty() {
                    return Err(HuntError::config("User agent cannot be empty"));
                }
            }
        }

        if let Some(bind) = config.server.as_ref().and_then(|s| s.bind.as_ref()) {
            if bind.parse::<std::net::SocketAddr>().is_err() {
                return Err(HuntError::config(format!(
                    "Invalid bind address '{}'. Use format like '127.0.0.1:3000'",
                    bind
                )));
            }
        }

        Ok(())
    }
}

/// Environment variable configuration.
///
/// Values set via `HH_*` environment variables. Unset or blank variables
/// are skipped; malformed values are a configuration error.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub timeout: Option<String>,
    pub concurrency: Option<usize>,
    pub platforms: Option<Vec<String>>,
    pub user_agent: Option<String>,
    pub bind: Option<String>,
    pub config: Option<String>,
}

/// Load configuration from `HH_*` environment variables.
pub fn load_env_config() -> Result<EnvConfig, HuntError> {
    load_env_config_from(|key| env::var(key).ok())
}

/// Load `HH_*` configuration through a lookup function.
pub fn load_env_config_from<F>(lookup: F) -> Result<EnvConfig, HuntError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let mut env_config = EnvConfig::default();

    // HH_TIMEOUT - per-probe timeout
    if let Some(timeout_str) = read("HH_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_none() {
            return Err(HuntError::config(format!(
                "Invalid HH_TIMEOUT '{}'. Use format like '5s', '30s', '2m'",
                timeout_str
            )));
        }
        debug!(value = %timeout_str, "using HH_TIMEOUT");
        env_config.timeout = Some(timeout_str);
    }

    // HH_CONCURRENCY - streaming concurrency
    if let Some(val) = read("HH_CONCURRENCY") {
        match val.trim().parse::<usize>() {
            Ok(concurrency) if concurrency > 0 && concurrency <= 100 => {
                debug!(concurrency, "using HH_CONCURRENCY");
                env_config.concurrency = Some(concurrency);
            }
            _ => {
                return Err(HuntError::config(format!(
                    "Invalid HH_CONCURRENCY '{}'. Must be between 1 and 100",
                    val
                )))
            }
        }
    }

    // HH_PLATFORMS - comma-separated default platform list
    if let Some(platform_str) = read("HH_PLATFORMS") {
        match crate::utils::parse_platform_list(Some(&platform_str)) {
            Some(platforms) => {
                debug!(value = %platform_str, "using HH_PLATFORMS");
                env_config.platforms = Some(platforms);
            }
            None => {
                return Err(HuntError::config(format!(
                    "Invalid HH_PLATFORMS '{}'. Use a comma-separated list like 'github,tiktok'",
                    platform_str
                )))
            }
        }
    }

    // HH_USER_AGENT - browser identity override
    if let Some(user_agent) = read("HH_USER_AGENT") {
        env_config.user_agent = Some(user_agent);
    }

    // HH_BIND - server listen address
    if let Some(bind) = read("HH_BIND") {
        if bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(HuntError::config(format!(
                "Invalid HH_BIND '{}'. Use format like '127.0.0.1:3000'",
                bind
            )));
        }
        debug!(value = %bind, "using HH_BIND");
        env_config.bind = Some(bind);
    }

    // HH_CONFIG - explicit config file
    if let Some(config_path) = read("HH_CONFIG") {
        env_config.config = Some(config_path);
    }

    Ok(env_config)
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds. Zero is rejected.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| m * 60)
    } else {
        timeout_str.parse::<u64>().ok()
    }?;

    if secs == 0 {
        None
    } else {
        Some(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("5s"), Some(5));
        assert_eq!(parse_timeout_string("30s"), Some(30));
        assert_eq!(parse_timeout_string("2m"), Some(120));
        assert_eq!(parse_timeout_string("5"), Some(5));
        assert_eq!(parse_timeout_string("0s"), None);
        assert_eq!(parse_timeout_string("invalid"), None);
    }

    #[test]
    fn test_load_valid_config() {
        let temp_file = write_config(
            r#"
[defaults]
timeout = "5s"
concurrency = 25
platforms = ["github", "tiktok"]

[server]
bind = "127.0.0.1:4000"
"#,
        );

        let config = ConfigManager::new().load_file(temp_file.path()).unwrap();

        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.timeout, Some("5s".to_string()));
        assert_eq!(defaults.concurrency, Some(25));
        assert_eq!(
            defaults.platforms,
            Some(vec!["github".to_string(), "tiktok".to_string()])
        );
        assert_eq!(config.server.unwrap().bind, Some("127.0.0.1:4000".to_string()));
    }

    #[test]
    fn test_invalid_concurrency() {
        let temp_file = write_config("[defaults]\nconcurrency = 0\n");
        assert!(ConfigManager::new().load_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_invalid_bind() {
        let temp_file = write_config("[server]\nbind = \"localhost\"\n");
        let err = ConfigManager::new().load_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, HuntError::ConfigError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigManager::new()
            .load_file("/nonexistent/handle-hunt.toml")
            .unwrap_err();
        assert!(matches!(err, HuntError::FileError { .. }));
    }

    #[test]
    fn test_merge_configs() {
        let manager = ConfigManager::new();

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                timeout: Some("10s".to_string()),
                concurrency: Some(10),
                ..Default::default()
            }),
            server: Some(ServerConfig {
                bind: Some("0.0.0.0:3000".to_string()),
            }),
        };

        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(25),
                ..Default::default()
            }),
            server: None,
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();

        assert_eq!(defaults.concurrency, Some(25)); // Higher wins
        assert_eq!(defaults.timeout, Some("10s".to_string())); // Lower preserved
        assert_eq!(merged.server.unwrap().bind, Some("0.0.0.0:3000".to_string()));
    }

    fn env_from(vars: &[(&'static str, &'static str)]) -> Result<EnvConfig, HuntError> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        load_env_config_from(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_env_config_parsing() {
        let env_config = env_from(&[
            ("HH_TIMEOUT", "3s"),
            ("HH_CONCURRENCY", "50"),
            ("HH_PLATFORMS", "github, tiktok,"),
            ("HH_BIND", "127.0.0.1:8080"),
            ("HH_USER_AGENT", "  "),
        ])
        .unwrap();

        assert_eq!(env_config.timeout, Some("3s".to_string()));
        assert_eq!(env_config.concurrency, Some(50));
        assert_eq!(
            env_config.platforms,
            Some(vec!["github".to_string(), "tiktok".to_string()])
        );
        assert_eq!(env_config.bind, Some("127.0.0.1:8080".to_string()));
        assert_eq!(env_config.user_agent, None); // Blank is treated as unset
    }

    #[test]
    fn test_invalid_env_values_are_config_errors() {
        let cases = [
            ("HH_TIMEOUT", "soon"),
            ("HH_CONCURRENCY", "500"),
            ("HH_CONCURRENCY", "many"),
            ("HH_PLATFORMS", " , "),
            ("HH_BIND", "localhost"),
        ];

        for (key, value) in cases {
            let err = env_from(&[(key, value)]).unwrap_err();
            assert!(
                matches!(err, HuntError::ConfigError { .. }),
                "{}={} should be rejected",
                key,
                value
            );
            assert!(err.to_string().contains(key));
        }
    }
}
