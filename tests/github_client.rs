use std::time::Duration;

use git_release::config::Config;
use git_release::error::ApiError;
use git_release::github::{
    AuthorizationApi, BasicLogin, GitHubClient, NewAuthorization, ReleaseApi, ReleaseUpdate,
    RepoSlug,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> Config {
    Config {
        token_file: std::env::temp_dir().join("git-release-test-token"),
        api_url: server.uri(),
        timeout: Duration::from_secs(5),
        authorization_note: "Git Release CLI".to_string(),
    }
}

fn login() -> BasicLogin {
    BasicLogin {
        username: "octocat".to_string(),
        password: "hunter2".to_string(),
    }
}

fn release_json(server: &MockServer, tag: &str) -> serde_json::Value {
    json!({
        "tag_name": tag,
        "draft": false,
        "prerelease": false,
        "body": "notes",
        "published_at": "2024-05-01T12:00:00Z",
        "url": format!("{}/repos/octo/widgets/releases/{}", server.uri(), tag),
    })
}

#[tokio::test]
async fn test_verify_token_uses_bearer_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})))
        .mount(&server)
        .await;

    let client = GitHubClient::new(&config(&server)).expect("client");

    assert!(client.verify_token("good").await.is_ok());
    assert!(matches!(
        client.verify_token("bad").await,
        Err(ApiError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn test_create_authorization_maps_otp_challenge() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authorizations"))
        .and(header("X-GitHub-OTP", "123456"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "note": "Git Release CLI",
            "token": "ghp_new"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/authorizations"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("X-GitHub-OTP", "required; app")
                .set_body_json(json!({"message": "Must specify two-factor authentication OTP code."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(&config(&server)).expect("client");
    let request = NewAuthorization::new("Git Release CLI", &["repo"]);

    assert!(matches!(
        client.create_authorization(&login(), &request, None).await,
        Err(ApiError::OtpRequired)
    ));

    let record = client
        .create_authorization(&login(), &request, Some("123456"))
        .await
        .expect("created");
    assert_eq!(record.id, 42);
    assert_eq!(record.token, "ghp_new");
}

#[tokio::test]
async fn test_create_authorization_sends_scopes_and_maps_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authorizations"))
        .and(header_exists("authorization"))
        .and(body_json(json!({"scopes": ["repo"], "note": "Git Release CLI"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{"resource": "OauthAccess", "code": "already_exists", "field": "description"}]
        })))
        .mount(&server)
        .await;

    let client = GitHubClient::new(&config(&server)).expect("client");
    let request = NewAuthorization::new("Git Release CLI", &["repo"]);

    match client.create_authorization(&login(), &request, None).await {
        Err(ApiError::NameConflict { note }) => assert_eq!(note, "Git Release CLI"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_and_delete_authorizations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authorizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "note": "Git Release CLI", "token": ""},
            {"id": 2, "note": null, "token": ""}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/authorizations/1"))
        .and(header("X-GitHub-OTP", "654321"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(&config(&server)).expect("client");

    let records = client
        .list_authorizations(&login(), None)
        .await
        .expect("listed");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].note.as_deref(), Some("Git Release CLI"));
    assert!(records[1].note.is_none());

    client
        .delete_authorization(&login(), 1, Some("654321"))
        .await
        .expect("deleted");
}

#[tokio::test]
async fn test_list_releases_follows_pages() {
    let server = MockServer::start().await;
    let full_page: Vec<_> = (0..100)
        .map(|i| release_json(&server, &format!("v0.{i:03}")))
        .collect();

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/releases"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(full_page)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/releases"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([release_json(&server, "v1.0")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(&config(&server))
        .expect("client")
        .with_token("t0k3n");
    let releases = client
        .list_releases(&RepoSlug::new("octo", "widgets"))
        .await
        .expect("listed");

    assert_eq!(releases.len(), 101);
    assert_eq!(releases[100].tag_name, "v1.0");
    assert!(releases[100].published_at.is_some());
}

#[tokio::test]
async fn test_update_release_patches_locator() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/widgets/releases/7"))
        .and(body_json(json!({"draft": false, "prerelease": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(&config(&server))
        .expect("client")
        .with_token("t0k3n");
    let update = ReleaseUpdate {
        draft: Some(false),
        prerelease: Some(true),
        body: None,
    };

    client
        .update_release(&format!("{}/repos/octo/widgets/releases/7", server.uri()), &update)
        .await
        .expect("updated");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/missing/releases"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let client = GitHubClient::new(&config(&server))
        .expect("client")
        .with_token("t0k3n");

    match client.list_releases(&RepoSlug::new("octo", "missing")).await {
        Err(ApiError::Remote { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
