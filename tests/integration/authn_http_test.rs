//! Integration tests for HTTP request authentication.

mod helpers;

use chrono::Duration;
use http::StatusCode;

use miniblog_auth::TokenCodec;
use miniblog_core::config::AuthConfig;

#[tokio::test]
async fn test_missing_authorization_is_rejected_without_lookup() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/v1/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.reason(), "Unauthenticated.NoCredential");
    assert_eq!(response.www_authenticate.as_deref(), Some("Bearer"));
    assert_eq!(app.retriever.calls(), 0);
}

#[tokio::test]
async fn test_valid_token_injects_identity() {
    let app = helpers::TestApp::new();
    let user_id = app.create_test_user("colin", "miniblog1234").await;
    let token = app.token_for(&user_id);

    let response = app.request("GET", "/v1/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user_id"], user_id.as_str());
    assert_eq!(response.body["data"]["username"], "colin");
    assert_eq!(app.retriever.calls(), 1);
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_accepted() {
    let app = helpers::TestApp::new();
    let user_id = app.create_test_user("colin", "miniblog1234").await;
    let auth = format!("bearer {}", app.token_for(&user_id));

    let response = app
        .request_with_headers("GET", "/v1/users/me", None, &[("Authorization", &auth)])
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_expires_after_two_hours() {
    let app = helpers::TestApp::new();
    let user_id = app.create_test_user("colin", "miniblog1234").await;
    let token = app.token_for(&user_id);

    app.clock.advance(Duration::hours(2) - Duration::seconds(1));
    let response = app.request("GET", "/v1/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let lookups = app.retriever.calls();

    app.clock.advance(Duration::seconds(2));
    let response = app.request("GET", "/v1/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.reason(), "Unauthenticated.TokenExpired");
    assert_eq!(
        response.www_authenticate.as_deref(),
        Some("Bearer error=\"invalid_token\"")
    );
    assert_eq!(app.retriever.calls(), lookups);
}

#[tokio::test]
async fn test_foreign_signature_rejected() {
    let app = helpers::TestApp::new();
    let user_id = app.create_test_user("colin", "miniblog1234").await;

    let foreign = TokenCodec::new(&AuthConfig {
        jwt_key: "some-other-signing-key".to_string(),
        ..AuthConfig::default()
    });
    let token = foreign.issue_default(&user_id).unwrap().token;

    let response = app.request("GET", "/v1/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.reason(), "Unauthenticated.TokenSignatureInvalid");
    assert_eq!(app.retriever.calls(), 0);
}

#[tokio::test]
async fn test_malformed_credentials() {
    let app = helpers::TestApp::new();

    for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer not.a.jwt", "token-only"] {
        let response = app
            .request_with_headers("GET", "/v1/users/me", None, &[("Authorization", value)])
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{value}");
        assert_eq!(response.reason(), "Unauthenticated.TokenMalformed", "{value}");
    }
    assert_eq!(app.retriever.calls(), 0);
}

#[tokio::test]
async fn test_unknown_subject_is_user_not_found() {
    let app = helpers::TestApp::new();
    let token = app.token_for("user-abc123");

    let response = app.request("GET", "/v1/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.reason(), "NotFound.UserNotFound");
    assert_eq!(app.retriever.calls(), 1);
}

#[tokio::test]
async fn test_storage_outage_is_retryable() {
    let app = helpers::TestApp::new();
    let user_id = app.create_test_user("colin", "miniblog1234").await;
    let token = app.token_for(&user_id);
    app.retriever.set_unavailable(true);

    let response = app.request("GET", "/v1/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.reason(), "Unavailable.StorageUnavailable");
    assert_eq!(response.body["retryable"], true);
    assert!(!response.body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_public_routes_skip_authentication() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/healthz", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert!(response.body["uptime_seconds"].as_i64().is_some_and(|s| s >= 0));
    assert_eq!(app.retriever.calls(), 0);
}

#[tokio::test]
async fn test_bypass_uses_trusted_header() {
    let app = helpers::TestApp::bypass();

    // A garbage bearer token is ignored entirely in bypass mode.
    let response = app
        .request_with_headers(
            "GET",
            "/v1/users/me",
            None,
            &[("X-User-ID", "user-000007"), ("Authorization", "Bearer garbage")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user_id"], "user-000007");
    assert!(response.body["data"].get("username").is_none());
    assert_eq!(app.retriever.calls(), 0);
}

#[tokio::test]
async fn test_bypass_does_not_mint_tokens() {
    let app = helpers::TestApp::bypass();

    let response = app
        .request_with_headers("PUT", "/refresh-token", None, &[("X-User-ID", "user-000007")])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), "InvalidParameter");
    assert!(response.body.get("data").is_none_or(|d| d.is_null()));
}

#[tokio::test]
async fn test_bypass_default_identity() {
    let app = helpers::TestApp::bypass();

    let response = app.request("GET", "/v1/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user_id"], "user-000001");
}
