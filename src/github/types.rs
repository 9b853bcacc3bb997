//! GitHub API payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository coordinates (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Owning user or organisation
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Create a slug from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One-shot basic credentials used only while creating a token
#[derive(Clone)]
pub struct BasicLogin {
    /// GitHub user name
    pub username: String,
    /// GitHub password
    pub password: String,
}

impl fmt::Debug for BasicLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicLogin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A named, revocable API credential
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationRecord {
    /// Authorization id
    pub id: u64,
    /// Display name; unique per account
    #[serde(default)]
    pub note: Option<String>,
    /// Token value (only populated in the creation response)
    #[serde(default)]
    pub token: String,
}

/// Body of an authorization creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAuthorization {
    /// Requested scopes
    pub scopes: Vec<String>,
    /// Display name
    pub note: String,
}

impl NewAuthorization {
    /// Request for a token with `scopes` named `note`
    pub fn new(note: impl Into<String>, scopes: &[&str]) -> Self {
        Self {
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            note: note.into(),
        }
    }
}

/// A published (or draft) release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Tag the release is attached to
    pub tag_name: String,
    /// Draft flag
    #[serde(default)]
    pub draft: bool,
    /// Prerelease flag
    #[serde(default)]
    pub prerelease: bool,
    /// Release notes
    #[serde(default)]
    pub body: Option<String>,
    /// Publication time; unset for drafts
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// API url used to update this release
    pub url: String,
}

/// Partial update of a release; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseUpdate {
    /// New draft flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// New prerelease flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
    /// New release notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
