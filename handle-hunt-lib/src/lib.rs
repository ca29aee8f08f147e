//! # Handle Hunt Library
//!
//! Checks whether a username ("handle") is free on a set of social
//! platforms. Every platform is queried concurrently and the answers are
//! collected into one list of verdicts, one per requested platform.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use handle_hunt_lib::HandleHunter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hunter = HandleHunter::new()?;
//!     let platforms = vec!["github".to_string(), "tiktok".to_string()];
//!
//!     for verdict in hunter.check_all("alice", &platforms).await? {
//!         println!("{}: {:?} - {}", verdict.platform(), verdict.available(), verdict.message());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Status probes**: availability from the HTTP status of a profile endpoint
//! - **Scrape probes**: availability from marker strings in the profile page
//! - **Fault isolation**: a failing, panicking or hanging probe only affects its own verdict
//! - **Pluggable registry**: register custom probes next to the built-in platforms

pub use config::{
    load_env_config, load_env_config_from, parse_timeout_string, ConfigManager, DefaultsConfig,
    EnvConfig, FileConfig, ServerConfig,
};
pub use error::HuntError;
pub use hunter::HandleHunter;
pub use probes::{
    extract_body_text, supported_platforms, HeaderStyle, PlatformDef, PlatformKind, Probe,
    ProbeClient, ProbeRegistry, ScrapeProbe, ScrapeRule, StatusProbe, UnsupportedProbe,
    BUILTIN_PLATFORMS,
};
pub use types::{
    HuntConfig, ProbeOutcome, Verdict, AVAILABLE_MESSAGE, DEFAULT_USER_AGENT, ERROR_MESSAGE,
    TAKEN_MESSAGE,
};
pub use utils::{normalize_platform_id, parse_platform_list, validate_handle, MAX_HANDLE_LEN};

pub mod probes;

mod config;
mod error;
mod hunter;
mod types;
mod utils;

pub type Result<T> = std::result::Result<T, HuntError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
