//! Error handling for handle checking operations.
//!
//! Per-platform failures never surface through this type to callers of the
//! engine: probes convert them into `unknown` verdicts. `HuntError` is what
//! probes use internally before that conversion, and what the engine returns
//! for batch-level problems such as a malformed handle.

use std::fmt;
use std::time::Duration;

/// Main error type for handle checking operations.
#[derive(Debug, Clone)]
pub enum HuntError {
    /// Handle is empty or contains characters no platform accepts
    InvalidHandle { handle: String, reason: String },

    /// Network-related errors (DNS, connection refused, TLS, ...)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// The platform answered with a status the probe cannot interpret
    UnexpectedStatus { url: String, status_code: u16 },

    /// The page fetch succeeded but carried no body to inspect
    EmptyBody { url: String },

    /// Timeout errors when a probe takes too long
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Configuration errors (invalid settings, bad TOML, ...)
    ConfigError { message: String },

    /// File I/O errors when reading configuration
    FileError { path: String, message: String },

    /// Generic internal errors (probe task panics, client construction)
    Internal { message: String },
}

impl HuntError {
    /// Create a new invalid handle error.
    pub fn invalid_handle<H: Into<String>, R: Into<String>>(handle: H, reason: R) -> Self {
        Self::InvalidHandle {
            handle: handle.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an error for a status code the probe has no rule for.
    pub fn unexpected_status<U: Into<String>>(url: U, status_code: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status_code,
        }
    }

    /// Create an error for an empty response body.
    pub fn empty_body<U: Into<String>>(url: U) -> Self {
        Self::EmptyBody { url: url.into() }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error came from the per-probe deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether the batch itself was rejected because of caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidHandle { .. })
    }
}

impl fmt::Display for HuntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle { handle, reason } => {
                write!(f, "Invalid handle '{}': {}", handle, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::UnexpectedStatus { url, status_code } => {
                write!(f, "Unexpected HTTP {} from '{}'", status_code, url)
            }
            Self::EmptyBody { url } => {
                write!(f, "No data received from '{}'", url)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for HuntError {}

impl From<reqwest::Error> for HuntError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timed out", err.to_string())
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else if let Some(status) = err.status() {
            Self::UnexpectedStatus {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                status_code: status.as_u16(),
            }
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<std::io::Error> for HuntError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<toml::de::Error> for HuntError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_handle() {
        let err = HuntError::invalid_handle("a b", "contains whitespace");
        assert_eq!(err.to_string(), "Invalid handle 'a b': contains whitespace");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_display_network_with_source() {
        let err = HuntError::network_with_source("Connection failed", "refused");
        assert_eq!(
            err.to_string(),
            "Network error: Connection failed (source: refused)"
        );
    }

    #[test]
    fn test_timeout_classification() {
        let err = HuntError::timeout("probe github", Duration::from_secs(8));
        assert!(err.is_timeout());
        assert!(!HuntError::empty_body("https://x").is_timeout());
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let err: HuntError = toml::from_str::<toml::Value>("not = [valid")
            .unwrap_err()
            .into();
        assert!(matches!(err, HuntError::ConfigError { .. }));
    }
}
