//! Repository resolution (explicit `owner/name` or the `origin` remote)

use crate::error::{CliError, Result};
use crate::github::RepoSlug;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Name of the remote whose URL identifies the GitHub repository
pub const ORIGIN: &str = "origin";

/// Resolve the repository to operate on
///
/// An explicit `owner/name` wins; otherwise the `origin` remote of the git
/// repository enclosing `dir` is used.
pub fn resolve_repo(explicit: Option<&str>, dir: &Path) -> Result<RepoSlug> {
    match explicit {
        Some(slug) => parse_slug(slug),
        None => {
            let url = origin_url(dir)?;
            log::debug!("Using remote '{ORIGIN}' at {url}");
            parse_github_url(&url)
        }
    }
}

fn not_repository(reason: impl Into<String>) -> crate::error::ReleaseError {
    CliError::NotRepository {
        reason: reason.into(),
    }
    .into()
}

/// URL of the `origin` remote of the repository enclosing `dir`
fn origin_url(dir: &Path) -> Result<String> {
    let repo = gix::discover(dir).map_err(|e| not_repository(e.to_string()))?;
    let remote = repo
        .find_remote(ORIGIN)
        .map_err(|e| not_repository(format!("no '{ORIGIN}' remote: {e}")))?;
    let url = remote
        .url(gix::remote::Direction::Fetch)
        .ok_or_else(|| not_repository(format!("remote '{ORIGIN}' has no fetch url")))?;
    Ok(url.to_bstring().to_string())
}

/// Parse `owner/name`
pub fn parse_slug(input: &str) -> Result<RepoSlug> {
    match input.trim().split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(RepoSlug::new(owner, name.trim_end_matches(".git")))
        }
        _ => Err(CliError::InvalidArguments {
            reason: format!("Invalid repository '{}'. Expected: owner/name", input),
        }
        .into()),
    }
}

/// Parse GitHub owner/repo from a git remote URL
///
/// Supports Git URL formats:
/// - SSH SCP-like: git@github.com:owner/repo.git
/// - HTTPS / SSH protocol: https://github.com/owner/repo.git, ssh://git@github.com/owner/repo
pub fn parse_github_url(url: &str) -> Result<RepoSlug> {
    static GITHUB_REMOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"github\.com[:/](?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$")
            .expect("GitHub remote regex is valid")
    });

    GITHUB_REMOTE_RE
        .captures(url.trim())
        .map(|caps| RepoSlug::new(&caps["owner"], &caps["repo"]))
        .ok_or_else(|| not_repository(format!("'{url}' is not a GitHub remote")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[test]
    fn test_parse_remote_urls() {
        for url in [
            "git@github.com:octo/widgets.git",
            "https://github.com/octo/widgets.git",
            "https://github.com/octo/widgets",
            "ssh://git@github.com/octo/widgets.git",
            "https://token@github.com/octo/widgets/",
        ] {
            assert_eq!(
                parse_github_url(url).expect(url),
                RepoSlug::new("octo", "widgets"),
                "{url}"
            );
        }
    }

    #[test]
    fn test_non_github_remote_is_rejected() {
        assert!(matches!(
            parse_github_url("https://gitlab.com/octo/widgets.git"),
            Err(ReleaseError::Cli(CliError::NotRepository { .. }))
        ));
    }

    #[test]
    fn test_explicit_slug() {
        let slug = resolve_repo(Some("octo/widgets"), Path::new(".")).expect("slug");
        assert_eq!(slug.to_string(), "octo/widgets");
        assert!(parse_slug("widgets").is_err());
        assert!(parse_slug("a/b/c").is_err());
    }

    #[test]
    fn test_directory_outside_git_is_not_repository() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            resolve_repo(None, dir.path()),
            Err(ReleaseError::Cli(CliError::NotRepository { .. }))
        ));
    }
}
