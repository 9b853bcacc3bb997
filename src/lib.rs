//! # git-release
//!
//! Manage the releases of a GitHub repository from the command line.
//!
//! ## Features
//!
//! - **Login**: Create a repo-scoped API token, with two-factor and token-name collision handling
//! - **Status report**: List releases with the current testing and production release
//! - **Promotion**: Move a release between draft, prerelease and release
//! - **Notes**: Clear or extend release notes
//!
//! ## Usage
//!
//! ```bash
//! git-release login                  # create or verify the API token
//! git-release list                   # show releases of the origin repository
//! git-release set v1.2.0 r           # promote v1.2.0 to a full release
//! git-release doc add v1.2.0 "Fixes #42"
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod config;
pub mod credential;
pub mod error;
pub mod github;
pub mod provision;
pub mod release;
pub mod repo;

// Re-export main types for public API
pub use config::Config;
pub use credential::{CredentialStore, TokenFile};
pub use error::{ApiError, CliError, CredentialError, ReleaseError, Result};
pub use github::{AuthorizationApi, GitHubClient, ReleaseApi};
pub use provision::{ProvisionOutcome, TokenProvisioner};
pub use release::{ReleaseMutator, ReleaseReport, ReleaseStatus, classify};
