//! Error types for git-release operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for git-release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// GitHub API errors
    #[error("{0}")]
    Api(#[from] ApiError),

    /// CLI and user interaction errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// Credential storage errors
    #[error("{0}")]
    Credential(#[from] CredentialError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by the GitHub API client
///
/// `OtpRequired` and `NameConflict` are expected signals that the login flow
/// recovers from; every other variant is fatal.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The account has two-factor authentication enabled and the request lacked a valid code
    #[error("two-factor authentication code required")]
    OtpRequired,

    /// An authorization with the requested note already exists
    #[error("an authorization named '{note}' already exists")]
    NameConflict {
        /// The colliding note
        note: String,
    },

    /// Credentials were rejected
    #[error("bad credentials: {message}")]
    Unauthorized {
        /// Message returned by the API
        message: String,
    },

    /// Any other non-success response
    #[error("{message} (HTTP {status})")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Message returned by the API, verbatim
        message: String,
    },

    /// Connection, timeout or body decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid API endpoint
    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Empty answer to an interactive prompt
    #[error("aborted: no input given for '{prompt}'")]
    UserAbort {
        /// The prompt that was left empty
        prompt: String,
    },

    /// Release state keyword not recognised
    #[error("unknown status '{keyword}'")]
    UnknownStatus {
        /// The keyword given on the command line
        keyword: String,
    },

    /// No release carries the requested tag
    #[error("unknown tag {tag}")]
    UnknownTag {
        /// The tag given on the command line
        tag: String,
    },

    /// The working directory has no usable GitHub `origin` remote
    #[error("not a git repository: {reason}")]
    NotRepository {
        /// Reason for the error
        reason: String,
    },

    /// Regenerating a token found no authorization with the conflicting note
    #[error("no authorization named '{note}' found to regenerate")]
    AuthorizationNotFound {
        /// Note that was searched for
        note: String,
    },

    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

/// Credential storage errors
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No token has been stored yet
    #[error("please login first (no token at {})", path.display())]
    NotFound {
        /// Expected token location
        path: PathBuf,
    },

    /// The token file exists but holds no token
    #[error("token file {} is empty", path.display())]
    Empty {
        /// Token location
        path: PathBuf,
    },

    /// Reading or writing the token file failed
    #[error("failed to access token file {}: {source}", path.display())]
    Io {
        /// Token location
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Home directory could not be determined
    #[error("could not determine home directory for the token file")]
    NoHomeDirectory,
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Credential(CredentialError::NotFound { .. })
            | ReleaseError::Credential(CredentialError::Empty { .. }) => {
                vec!["Create an API token: git-release login".to_string()]
            }
            ReleaseError::Credential(CredentialError::NoHomeDirectory) => vec![
                "Set GIT_RELEASE_TOKEN_FILE to choose the token location".to_string(),
            ],
            ReleaseError::Api(ApiError::Unauthorized { .. }) => vec![
                "Verify your GitHub username and password".to_string(),
                "Refresh a stale token: git-release login".to_string(),
            ],
            ReleaseError::Cli(CliError::UnknownStatus { .. }) => {
                vec!["use one of: r[elease], p[rerelease] or d[raft]".to_string()]
            }
            ReleaseError::Cli(CliError::UnknownTag { .. }) => {
                vec!["List existing releases: git-release list".to_string()]
            }
            ReleaseError::Cli(CliError::NotRepository { .. }) => vec![
                "Run from inside a clone whose 'origin' points at GitHub".to_string(),
                "Or name the repository explicitly: --repo owner/name".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}
