//! Common test utilities
//!
//! Builds the full router over a fresh `MemoryStore` and wraps the calls most
//! tests start with: registering an account and attaching its token.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use devconnect::backend::auth::TokenService;
use devconnect::backend::profile::GithubClient;
use devconnect::backend::{build_app, AppState, MemoryStore};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Nothing listens here; GitHub calls fail fast unless a test mocks them
pub const UNREACHABLE_GITHUB: &str = "http://127.0.0.1:9";

pub fn test_state(github_url: &str) -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        TokenService::new(TEST_SECRET),
        GithubClient::new(github_url, None),
    )
}

pub fn test_server() -> TestServer {
    test_server_with_github(UNREACHABLE_GITHUB)
}

pub fn test_server_with_github(github_url: &str) -> TestServer {
    TestServer::new(build_app(test_state(github_url))).expect("test server starts")
}

/// A complete, valid registration body
pub fn registration(first_name: &str, email: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Tester",
        "email": email,
        "password": "secret123",
        "birthday": "1990-04-01",
        "gender": "female"
    })
}

/// Register an account and return its token
pub async fn register(server: &TestServer, first_name: &str, email: &str) -> String {
    let response = server
        .post("/api/users")
        .json(&registration(first_name, email))
        .await;
    assert_eq!(
        response.status_code(),
        StatusCode::OK,
        "registration failed: {}",
        response.text()
    );

    let body: Value = response.json();
    body["token"].as_str().expect("token in response").to_string()
}

/// Id of the account behind `token`
pub async fn user_id(server: &TestServer, token: &str) -> String {
    let (name, value) = token_header(token);
    let body: Value = server.get("/api/auth").add_header(name, value).await.json();
    body["_id"].as_str().expect("user id").to_string()
}

/// `x-auth-token` header carrying `token`
pub fn token_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-auth-token"),
        HeaderValue::from_str(token).expect("token is a valid header value"),
    )
}

/// First message of an `errors` array body
pub fn first_error(body: &Value) -> &str {
    body["errors"][0]["msg"].as_str().unwrap_or_default()
}
