//! Utility functions for handle and platform-list processing.
//!
//! This module contains helpers for handle validation, platform identifier
//! normalization, and parsing of comma-separated platform lists.

use crate::error::HuntError;
use regex::Regex;

lazy_static::lazy_static! {
    /// Characters every supported platform accepts in a profile path.
    static ref HANDLE_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
}

/// Longest handle accepted before any probe runs.
pub const MAX_HANDLE_LEN: usize = 100;

/// Validate a handle before it is interpolated into profile URLs.
///
/// The handle is checked as given: no trimming and no case folding, since
/// the verdict echoes it back unmodified.
pub fn validate_handle(handle: &str) -> Result<(), HuntError> {
    if handle.trim().is_empty() {
        return Err(HuntError::invalid_handle(handle, "Handle cannot be empty"));
    }

    if handle.len() > MAX_HANDLE_LEN {
        return Err(HuntError::invalid_handle(
            handle,
            format!("Handle longer than {} characters", MAX_HANDLE_LEN),
        ));
    }

    if !HANDLE_PATTERN.is_match(handle) {
        return Err(HuntError::invalid_handle(
            handle,
            "Only letters, digits, '.', '_' and '-' are allowed",
        ));
    }

    // "." and ".." are dot-segments; URL normalization would drop them from the path
    if handle.chars().all(|c| c == '.') {
        return Err(HuntError::invalid_handle(
            handle,
            "Handle cannot consist only of dots",
        ));
    }

    Ok(())
}

/// Canonical form of a platform identifier: trimmed and lower-cased.
pub fn normalize_platform_id(platform: &str) -> String {
    platform.trim().to_lowercase()
}

/// Parse a comma-separated platform list.
///
/// Blank entries are dropped. Returns `None` when nothing usable remains,
/// which callers treat as "use the default platform set".
pub fn parse_platform_list(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?;

    let platforms: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if platforms.is_empty() {
        None
    } else {
        Some(platforms)
    }
}

/// Substitute a handle into a URL template containing `{handle}`.
pub(crate) fn render_template(template: &str, handle: &str) -> String {
    template.replace("{handle}", handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_handle() {
        assert!(validate_handle("alice").is_ok());
        assert!(validate_handle("Alice.Smith_99-x").is_ok());
        assert!(validate_handle("").is_err());
        assert!(validate_handle("   ").is_err());
        assert!(validate_handle("a b").is_err());
        assert!(validate_handle("../etc").is_err());
        assert!(validate_handle(".").is_err());
        assert!(validate_handle("..").is_err());
        assert!(validate_handle("...").is_err());
        assert!(validate_handle(".alice.").is_ok());
        assert!(validate_handle("alice?x=1").is_err());
        assert!(validate_handle(&"a".repeat(MAX_HANDLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_normalize_platform_id() {
        assert_eq!(normalize_platform_id("  GitHub "), "github");
        assert_eq!(normalize_platform_id("tiktok"), "tiktok");
    }

    #[test]
    fn test_parse_platform_list() {
        assert_eq!(
            parse_platform_list(Some("github, Instagram ,tiktok")),
            Some(vec![
                "github".to_string(),
                "Instagram".to_string(),
                "tiktok".to_string()
            ])
        );
        assert_eq!(
            parse_platform_list(Some("github,,github")),
            Some(vec!["github".to_string(), "github".to_string()])
        );
        assert_eq!(parse_platform_list(Some("")), None);
        assert_eq!(parse_platform_list(Some(" , ")), None);
        assert_eq!(parse_platform_list(None), None);
    }

    #[test]
    fn test_render_template() {
        assert_eq!(
            render_template("https://www.threads.net/@{handle}", "alice"),
            "https://www.threads.net/@alice"
        );
    }
}
