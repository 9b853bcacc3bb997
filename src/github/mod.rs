//! GitHub integration for release operations

mod api;
mod client;
mod types;

pub use api::{AuthorizationApi, ReleaseApi};
pub use client::{GitHubClient, OTP_HEADER};
pub use types::{
    AuthorizationRecord, BasicLogin, NewAuthorization, Release, ReleaseUpdate, RepoSlug,
};
