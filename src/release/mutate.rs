//! Single-field release updates: lifecycle state and notes.

use crate::error::{CliError, Result};
use crate::github::{Release, ReleaseApi, ReleaseUpdate, RepoSlug};
use std::fmt;
use std::str::FromStr;

/// Target lifecycle state for `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStatus {
    /// Full release
    Release,
    /// Prerelease
    Prerelease,
    /// Draft
    Draft,
}

/// Keywords accepted on the command line
pub const STATUS_KEYWORDS: &[(&str, ReleaseStatus)] = &[
    ("r", ReleaseStatus::Release),
    ("p", ReleaseStatus::Prerelease),
    ("d", ReleaseStatus::Draft),
    ("release", ReleaseStatus::Release),
    ("prerelease", ReleaseStatus::Prerelease),
    ("draft", ReleaseStatus::Draft),
];

impl ReleaseStatus {
    /// `(draft, prerelease)` flags for this state
    pub fn flags(self) -> (bool, bool) {
        match self {
            Self::Release => (false, false),
            Self::Prerelease => (false, true),
            Self::Draft => (true, true),
        }
    }

    /// Partial update switching a release to this state
    pub fn update(self) -> ReleaseUpdate {
        let (draft, prerelease) = self.flags();
        ReleaseUpdate {
            draft: Some(draft),
            prerelease: Some(prerelease),
            body: None,
        }
    }
}

impl FromStr for ReleaseStatus {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        STATUS_KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == s)
            .map(|(_, status)| *status)
            .ok_or_else(|| CliError::UnknownStatus {
                keyword: s.to_string(),
            })
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Release => "release",
            Self::Prerelease => "prerelease",
            Self::Draft => "draft",
        })
    }
}

/// Release notes after appending `lines` to `existing`
///
/// A single line break separates old and new text; an empty or absent body
/// is replaced outright.
pub fn appended_body(existing: Option<&str>, lines: &[String]) -> String {
    let text = lines.join("\n");
    match existing {
        Some(body) if !body.is_empty() => format!("{body}\n{text}"),
        _ => text,
    }
}

/// Find the release tagged `tag`
pub fn find_release<'r>(releases: &'r [Release], tag: &str) -> Result<&'r Release> {
    releases
        .iter()
        .find(|r| r.tag_name == tag)
        .ok_or_else(|| {
            CliError::UnknownTag {
                tag: tag.to_string(),
            }
            .into()
        })
}

/// Applies updates to releases of one repository, addressed by tag
pub struct ReleaseMutator<'a, A> {
    api: &'a A,
    repo: &'a RepoSlug,
}

impl<'a, A: ReleaseApi> ReleaseMutator<'a, A> {
    /// Mutator for releases of `repo`
    pub fn new(api: &'a A, repo: &'a RepoSlug) -> Self {
        Self { api, repo }
    }

    async fn lookup(&self, tag: &str) -> Result<Release> {
        let releases = self.api.list_releases(self.repo).await?;
        find_release(&releases, tag).cloned()
    }

    /// Move the release tagged `tag` to `status`
    pub async fn set_status(&self, tag: &str, status: ReleaseStatus) -> Result<()> {
        let release = self.lookup(tag).await?;
        log::info!("Setting {} of {} to {}", tag, self.repo, status);
        self.api.update_release(&release.url, &status.update()).await?;
        Ok(())
    }

    /// Empty the notes of the release tagged `tag`
    pub async fn clear_notes(&self, tag: &str) -> Result<()> {
        let release = self.lookup(tag).await?;
        let update = ReleaseUpdate {
            body: Some(String::new()),
            ..Default::default()
        };
        self.api.update_release(&release.url, &update).await?;
        Ok(())
    }

    /// Append `lines` to the notes of the release tagged `tag`
    pub async fn append_notes(&self, tag: &str, lines: &[String]) -> Result<()> {
        let release = self.lookup(tag).await?;
        let update = ReleaseUpdate {
            body: Some(appended_body(release.body.as_deref(), lines)),
            ..Default::default()
        };
        self.api.update_release(&release.url, &update).await?;
        Ok(())
    }
}
