//! REST client for the GitHub API

use super::api::{AuthorizationApi, ReleaseApi};
use super::types::{
    AuthorizationRecord, BasicLogin, NewAuthorization, Release, ReleaseUpdate, RepoSlug,
};
use crate::config::Config;
use crate::error::ApiError;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

/// Side-channel header carrying the two-factor code
pub const OTP_HEADER: &str = "X-GitHub-OTP";

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("git-release/", env!("CARGO_PKG_VERSION"));
const RELEASES_PER_PAGE: usize = 100;

/// GitHub API client
///
/// Token-authenticated for release operations; authorization management uses
/// the per-call [`BasicLogin`] instead.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Create an unauthenticated client from configuration
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        // Url::join drops the last path segment unless the base ends in '/'
        let mut base = config.api_url.trim_end_matches('/').to_string();
        base.push('/');

        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            token: None,
        })
    }

    /// Use `token` for release operations
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn basic(request: RequestBuilder, login: &BasicLogin, otp: Option<&str>) -> RequestBuilder {
        let request = request.basic_auth(&login.username, Some(&login.password));
        match otp {
            Some(code) => request.header(OTP_HEADER, code),
            None => request,
        }
    }
}

/// Send `request` and turn any non-success status into an [`ApiError`]
async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let otp_header = response
        .headers()
        .get(OTP_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await.unwrap_or_default();

    log::debug!("GitHub API answered HTTP {}", status.as_u16());
    Err(failure_from_response(
        status.as_u16(),
        otp_header.as_deref(),
        &body,
    ))
}

/// Classify a failed response
///
/// The conflicting note is not known here; callers fill it in.
pub(crate) fn failure_from_response(status: u16, otp_header: Option<&str>, body: &str) -> ApiError {
    if status == 401
        && otp_header.is_some_and(|h| h.trim_start().to_ascii_lowercase().starts_with("required"))
    {
        return ApiError::OtpRequired;
    }

    if status == 422 && body.contains("already_exists") {
        return ApiError::NameConflict {
            note: String::new(),
        };
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("unexpected response")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    if status == 401 {
        ApiError::Unauthorized { message }
    } else {
        ApiError::Remote { status, message }
    }
}

impl AuthorizationApi for GitHubClient {
    async fn verify_token(&self, token: &str) -> Result<(), ApiError> {
        let url = self.endpoint("user/repos")?;
        send(self.http.get(url).bearer_auth(token)).await?;
        Ok(())
    }

    async fn list_authorizations(
        &self,
        login: &BasicLogin,
        otp: Option<&str>,
    ) -> Result<Vec<AuthorizationRecord>, ApiError> {
        let url = self.endpoint("authorizations")?;
        let response = send(Self::basic(self.http.get(url), login, otp)).await?;
        Ok(response.json().await?)
    }

    async fn create_authorization(
        &self,
        login: &BasicLogin,
        request: &NewAuthorization,
        otp: Option<&str>,
    ) -> Result<AuthorizationRecord, ApiError> {
        let url = self.endpoint("authorizations")?;
        log::debug!("Creating authorization '{}'", request.note);

        match send(Self::basic(self.http.post(url).json(request), login, otp)).await {
            Ok(response) => Ok(response.json().await?),
            Err(ApiError::NameConflict { .. }) => Err(ApiError::NameConflict {
                note: request.note.clone(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn delete_authorization(
        &self,
        login: &BasicLogin,
        id: u64,
        otp: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("authorizations/{id}"))?;
        log::debug!("Deleting authorization {id}");
        send(Self::basic(self.http.delete(url), login, otp)).await?;
        Ok(())
    }
}

impl ReleaseApi for GitHubClient {
    async fn list_releases(&self, repo: &RepoSlug) -> Result<Vec<Release>, ApiError> {
        let url = self.endpoint(&format!("repos/{}/{}/releases", repo.owner, repo.name))?;
        let mut releases = Vec::new();
        let mut page = 1usize;

        loop {
            let request = self.http.get(url.clone()).query(&[
                ("per_page", RELEASES_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let batch: Vec<Release> = send(self.authorized(request)).await?.json().await?;
            let fetched = batch.len();
            releases.extend(batch);

            if fetched < RELEASES_PER_PAGE {
                break;
            }
            page += 1;
        }

        log::debug!("Fetched {} release(s) of {}", releases.len(), repo);
        Ok(releases)
    }

    async fn update_release(&self, locator: &str, update: &ReleaseUpdate) -> Result<(), ApiError> {
        let url = Url::parse(locator)?;
        send(self.authorized(self.http.patch(url).json(update))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_header_marks_two_factor_challenge() {
        let err = failure_from_response(401, Some("required; app"), r#"{"message":"Must specify two-factor authentication OTP code."}"#);
        assert!(matches!(err, ApiError::OtpRequired));
    }

    #[test]
    fn test_plain_401_is_unauthorized() {
        let err = failure_from_response(401, None, r#"{"message":"Bad credentials"}"#);
        match err {
            ApiError::Unauthorized { message } => assert_eq!(message, "Bad credentials"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_already_exists_is_name_conflict() {
        let body = r#"{"message":"Validation Failed","errors":[{"resource":"OauthAccess","code":"already_exists","field":"description"}]}"#;
        assert!(matches!(
            failure_from_response(422, None, body),
            ApiError::NameConflict { .. }
        ));
    }

    #[test]
    fn test_other_validation_failure_is_remote() {
        let body = r#"{"message":"Validation Failed","errors":[{"code":"missing_field"}]}"#;
        match failure_from_response(422, None, body) {
            ApiError::Remote { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Validation Failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_uses_status_reason() {
        match failure_from_response(404, None, "") {
            ApiError::Remote { message, .. } => assert_eq!(message, "Not Found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
