//! Runtime configuration.
//!
//! Every tunable is read once from the environment and passed explicitly to
//! the components that need it.

use crate::error::{CredentialError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Token file name inside the home directory
pub const TOKEN_FILE_NAME: &str = ".git-release-token";

/// Note attached to authorizations created by `login`
pub const DEFAULT_AUTHORIZATION_NOTE: &str = "Git Release CLI";

/// Scopes requested for new authorizations
pub const AUTHORIZATION_SCOPES: &[&str] = &["repo"];

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 600;

/// Configuration shared by all commands
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the stored API token
    pub token_file: PathBuf,
    /// Base URL of the GitHub REST API
    pub api_url: String,
    /// Per-request network timeout
    pub timeout: Duration,
    /// Note used for the first authorization attempt
    pub authorization_note: String,
}

impl Config {
    /// Build the configuration from environment variables with fallback to defaults
    ///
    /// * `GIT_RELEASE_TOKEN_FILE` - token location (default `~/.git-release-token`)
    /// * `GIT_RELEASE_API_URL` - API endpoint (default `https://api.github.com`)
    /// * `GIT_RELEASE_TIMEOUT_SECS` - request timeout, clamped to 1..=600
    pub fn from_env() -> Result<Self> {
        let token_file = match non_empty_env("GIT_RELEASE_TOKEN_FILE") {
            Some(path) => PathBuf::from(path),
            None => dirs::home_dir()
                .ok_or(CredentialError::NoHomeDirectory)?
                .join(TOKEN_FILE_NAME),
        };

        Ok(Self {
            token_file,
            api_url: non_empty_env("GIT_RELEASE_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(parse_timeout(
                std::env::var("GIT_RELEASE_TIMEOUT_SECS").ok().as_deref(),
            )),
            authorization_note: DEFAULT_AUTHORIZATION_NOTE.to_string(),
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a timeout in seconds, clamped to [1, MAX_TIMEOUT_SECS]
fn parse_timeout(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .map(|v| v.clamp(1, MAX_TIMEOUT_SECS))
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}
