//! Release status report.
//!
//! Releases are ordered by tag name, newest-looking first, and the first
//! prerelease and the first full release met in that order become the
//! "current" testing and production releases. Ordering is a plain string
//! comparison: `v10` sorts before `v9`, so tags must be zero-padded or
//! otherwise lexically monotonic for the markers to be meaningful.

use crate::github::Release;
use chrono::{DateTime, Utc};

/// Lifecycle state of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Unpublished
    Draft,
    /// Published for testing
    Prerelease,
    /// Published for production
    Release,
}

impl ReleaseKind {
    /// Classify `release`; the draft flag wins over the prerelease flag
    pub fn of(release: &Release) -> Self {
        if release.draft {
            Self::Draft
        } else if release.prerelease {
            Self::Prerelease
        } else {
            Self::Release
        }
    }

    /// Lowercase name
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Prerelease => "prerelease",
            Self::Release => "release",
        }
    }
}

/// Which channel(s) a release currently serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentMarker {
    /// Newest prerelease
    Testing,
    /// Newest release, with a newer prerelease ahead of it
    Production,
    /// Newest release with nothing newer in testing
    TestingAndProduction,
}

impl CurrentMarker {
    /// Human-readable annotation
    pub fn label(self) -> &'static str {
        match self {
            Self::Testing => "current testing",
            Self::Production => "current production",
            Self::TestingAndProduction => "current testing and production",
        }
    }
}

/// A channel with no current release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingChannel {
    /// Nothing to test
    Testing,
    /// Nothing in production
    Production,
}

impl MissingChannel {
    /// Warning shown under the report
    pub fn message(self) -> &'static str {
        match self {
            Self::Testing => "no release for testing",
            Self::Production => "no release for production",
        }
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRelease {
    /// Tag name
    pub tag: String,
    /// Lifecycle state
    pub kind: ReleaseKind,
    /// Set on the current testing/production release
    pub marker: Option<CurrentMarker>,
    /// Publication time
    pub published_at: Option<DateTime<Utc>>,
    /// Release notes split into lines
    pub notes: Vec<String>,
}

/// Ordered, annotated view of a repository's releases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Releases in descending tag order
    pub entries: Vec<ClassifiedRelease>,
    /// Tag of the current testing release
    pub current_testing: Option<String>,
    /// Tag of the current production release
    pub current_production: Option<String>,
}

impl ReleaseReport {
    /// Channels without a current release, testing first
    pub fn missing_channels(&self) -> Vec<MissingChannel> {
        let mut missing = Vec::new();
        if self.current_testing.is_none() {
            missing.push(MissingChannel::Testing);
        }
        if self.current_production.is_none() {
            missing.push(MissingChannel::Production);
        }
        missing
    }
}

/// Build the report for `releases` (in any order)
pub fn classify(releases: &[Release]) -> ReleaseReport {
    let mut sorted: Vec<&Release> = releases.iter().collect();
    sorted.sort_by(|a, b| b.tag_name.cmp(&a.tag_name));

    let mut current_testing: Option<String> = None;
    let mut current_production: Option<String> = None;
    let mut entries = Vec::with_capacity(sorted.len());

    for release in sorted {
        let kind = ReleaseKind::of(release);
        let tag = release.tag_name.clone();

        let marker = match kind {
            ReleaseKind::Draft => None,
            ReleaseKind::Prerelease if current_testing.is_none() => {
                current_testing = Some(tag.clone());
                Some(CurrentMarker::Testing)
            }
            ReleaseKind::Prerelease => None,
            ReleaseKind::Release if current_production.is_none() => {
                current_production = Some(tag.clone());
                if current_testing.is_none() {
                    current_testing = Some(tag.clone());
                    Some(CurrentMarker::TestingAndProduction)
                } else {
                    Some(CurrentMarker::Production)
                }
            }
            ReleaseKind::Release => None,
        };

        entries.push(ClassifiedRelease {
            tag,
            kind,
            marker,
            published_at: release.published_at,
            notes: release
                .body
                .as_deref()
                .map(|body| body.lines().map(str::to_string).collect())
                .unwrap_or_default(),
        });
    }

    ReleaseReport {
        entries,
        current_testing,
        current_production,
    }
}
