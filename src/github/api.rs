//! Capabilities the core logic needs from the hosting service.
//!
//! Kept as traits so the login state machine and the release commands can be
//! driven by scripted fakes in tests.

#![allow(async_fn_in_trait)]

use super::types::{
    AuthorizationRecord, BasicLogin, NewAuthorization, Release, ReleaseUpdate, RepoSlug,
};
use crate::error::ApiError;

/// Token verification and authorization management
pub trait AuthorizationApi {
    /// Make a cheap authenticated call with `token`; `Ok` means the token works
    async fn verify_token(&self, token: &str) -> Result<(), ApiError>;

    /// List the account's authorizations
    async fn list_authorizations(
        &self,
        login: &BasicLogin,
        otp: Option<&str>,
    ) -> Result<Vec<AuthorizationRecord>, ApiError>;

    /// Create a new authorization
    ///
    /// Fails with [`ApiError::OtpRequired`] when a two-factor code is missing or
    /// stale and with [`ApiError::NameConflict`] when the note is taken.
    async fn create_authorization(
        &self,
        login: &BasicLogin,
        request: &NewAuthorization,
        otp: Option<&str>,
    ) -> Result<AuthorizationRecord, ApiError>;

    /// Delete the authorization with `id`
    async fn delete_authorization(
        &self,
        login: &BasicLogin,
        id: u64,
        otp: Option<&str>,
    ) -> Result<(), ApiError>;
}

/// Release listing and updates
pub trait ReleaseApi {
    /// All releases of `repo`, in whatever order the service returns them
    async fn list_releases(&self, repo: &RepoSlug) -> Result<Vec<Release>, ApiError>;

    /// Apply `update` to the release at `locator`
    async fn update_release(&self, locator: &str, update: &ReleaseUpdate) -> Result<(), ApiError>;
}
