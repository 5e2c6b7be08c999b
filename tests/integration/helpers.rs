//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use miniblog_api::{AppState, build_router};
use miniblog_auth::{PasswordHasher, TokenCodec, UserRetriever};
use miniblog_core::clock::ManualClock;
use miniblog_core::config::{AppConfig, AuthMode};
use miniblog_core::error::AppError;
use miniblog_core::result::AppResult;
use miniblog_entity::{CreateUser, User};
use miniblog_store::{MemoryUserStore, UserStore};

/// Retriever handed to authentication: counts lookups and can be switched
/// into an outage.
#[derive(Debug)]
pub struct CountingRetriever {
    store: Arc<MemoryUserStore>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl CountingRetriever {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRetriever for CountingRetriever {
    async fn get_user(&self, user_id: &str) -> AppResult<Option<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal("connection refused"));
        }
        self.store.get_user(user_id).await
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing user store
    pub store: Arc<MemoryUserStore>,
    /// Lookup counter seen by the authentication layer
    pub retriever: Arc<CountingRetriever>,
    /// Clock shared with the token codec
    pub clock: Arc<ManualClock>,
    /// Codec used by the server
    pub codec: Arc<TokenCodec>,
}

impl TestApp {
    /// App with bearer-token authentication.
    pub fn new() -> Self {
        Self::with_mode(AuthMode::Jwt)
    }

    /// App with the trusted-header bypass.
    pub fn bypass() -> Self {
        Self::with_mode(AuthMode::Bypass)
    }

    fn with_mode(mode: AuthMode) -> Self {
        let mut config = AppConfig::default();
        config.auth.mode = mode;

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let codec = Arc::new(TokenCodec::with_clock(&config.auth, clock.clone()));
        let store = Arc::new(MemoryUserStore::default());
        let retriever = Arc::new(CountingRetriever {
            store: store.clone(),
            calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        });

        let state = AppState::new(config, store.clone(), retriever.clone(), codec.clone());

        Self {
            router: build_router(state),
            store,
            retriever,
            clock,
            codec,
        }
    }

    /// Create a user directly in the store and return its identifier.
    pub async fn create_test_user(&self, username: &str, password: &str) -> String {
        let password_hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");

        self.store
            .create(CreateUser {
                username: username.to_string(),
                password_hash,
                nickname: None,
                email: None,
                phone: None,
            })
            .await
            .expect("Failed to create test user")
            .user_id
    }

    /// Issue a token for `user_id` with the server's codec.
    pub fn token_for(&self, user_id: &str) -> String {
        self.codec
            .issue_default(user_id)
            .expect("Failed to issue token")
            .token
    }

    /// Make a request with an optional bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let auth = token.map(|t| format!("Bearer {t}"));
        let mut headers = Vec::new();
        if let Some(auth) = auth.as_deref() {
            headers.push(("Authorization", auth));
        }
        self.request_with_headers(method, path, body, &headers).await
    }

    /// Make a request with arbitrary headers.
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let www_authenticate = response
            .headers()
            .get(http::header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            www_authenticate,
        }
    }
}

/// Simplified test response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `WWW-Authenticate` challenge, if any
    pub www_authenticate: Option<String>,
}

impl TestResponse {
    /// The machine-readable error reason.
    pub fn reason(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
