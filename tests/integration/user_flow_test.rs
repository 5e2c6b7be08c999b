//! Integration tests for registration, login, lookup, and token refresh.

mod helpers;

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_login_fetch_refresh() {
    let app = helpers::TestApp::new();

    let created = app
        .request(
            "POST",
            "/v1/users",
            Some(json!({
                "username": "colin",
                "password": "miniblog1234",
                "nickname": "Colin",
                "email": "colin@example.com",
            })),
            None,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let user_id = created.body["data"]["user_id"].as_str().unwrap().to_string();
    assert!(user_id.starts_with("user-"));
    assert_eq!(user_id.len(), "user-".len() + 6);
    assert!(created.body["data"].get("password_hash").is_none());

    let login = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "colin", "password": "miniblog1234" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["data"]["token"].as_str().unwrap().to_string();
    let first_expiry: DateTime<Utc> =
        serde_json::from_value(login.body["data"]["expire_at"].clone()).unwrap();

    let fetched = app
        .request("GET", &format!("/v1/users/{user_id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["nickname"], "Colin");
    assert!(fetched.body["data"].get("password_hash").is_none());

    app.clock.advance(Duration::minutes(30));
    let refreshed = app.request("PUT", "/refresh-token", None, Some(&token)).await;
    assert_eq!(refreshed.status, StatusCode::OK);
    let new_token = refreshed.body["data"]["token"].as_str().unwrap().to_string();
    let new_expiry: DateTime<Utc> =
        serde_json::from_value(refreshed.body["data"]["expire_at"].clone()).unwrap();
    assert_ne!(new_token, token);
    assert_eq!(new_expiry - first_expiry, Duration::minutes(30));

    // The original token dies on schedule; the refreshed one lives on.
    app.clock.advance(Duration::minutes(100));
    let old = app.request("GET", "/v1/users/me", None, Some(&token)).await;
    assert_eq!(old.reason(), "Unauthenticated.TokenExpired");
    let new = app.request("GET", "/v1/users/me", None, Some(&new_token)).await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = helpers::TestApp::new();
    app.create_test_user("colin", "miniblog1234").await;

    let wrong_password = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "colin", "password": "nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "nobody", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.reason(), "Unauthenticated.InvalidCredentials");
}

#[tokio::test]
async fn test_username_with_surrounding_whitespace_round_trips() {
    let app = helpers::TestApp::new();
    let credentials = json!({ "username": " colin ", "password": "miniblog1234" });

    let created = app
        .request("POST", "/v1/users", Some(credentials.clone()), None)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["username"], "colin");

    let login = app.request("POST", "/login", Some(credentials), None).await;
    assert_eq!(login.status, StatusCode::OK);

    let trimmed = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "colin", "password": "miniblog1234" })),
            None,
        )
        .await;
    assert_eq!(trimmed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = helpers::TestApp::new();
    let body = json!({ "username": "colin", "password": "miniblog1234" });

    let first = app.request("POST", "/v1/users", Some(body.clone()), None).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.request("POST", "/v1/users", Some(body), None).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.reason(), "AlreadyExists");
}

#[tokio::test]
async fn test_registration_validation() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/v1/users",
            Some(json!({ "username": "", "password": "miniblog1234" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), "InvalidParameter");
}

#[tokio::test]
async fn test_get_user_rejects_bad_ids() {
    let app = helpers::TestApp::new();
    let user_id = app.create_test_user("colin", "miniblog1234").await;
    let token = app.token_for(&user_id);

    let malformed = app
        .request("GET", "/v1/users/post-abcdef", None, Some(&token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request("GET", "/v1/users/user-zzzzzz", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.reason(), "NotFound");
}

#[tokio::test]
async fn test_refresh_requires_authentication() {
    let app = helpers::TestApp::new();

    let response = app.request("PUT", "/refresh-token", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.reason(), "Unauthenticated.NoCredential");
}
