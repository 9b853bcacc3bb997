//! Context for commands that operate on a repository's releases.

use crate::config::Config;
use crate::credential::{CredentialStore, TokenFile};
use crate::error::Result;
use crate::github::{GitHubClient, RepoSlug};
use crate::repo::resolve_repo;

/// Resolved repository plus a token-authenticated client
pub(super) struct RepoContext {
    /// Repository whose releases are managed
    pub repo: RepoSlug,
    /// Client authenticated with the stored token
    pub client: GitHubClient,
}

impl RepoContext {
    /// Resolve the repository, then load the stored token
    pub(super) fn open(explicit_repo: Option<&str>, config: &Config) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let repo = resolve_repo(explicit_repo, &cwd)?;
        let token = TokenFile::new(&config.token_file).read()?;
        let client = GitHubClient::new(config)?.with_token(token);

        Ok(Self { repo, client })
    }
}
