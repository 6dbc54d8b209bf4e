//! Registration, login and token middleware tests

mod common;

use assert_matches::assert_matches;
use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{first_error, register, registration, test_server, token_header, user_id, TEST_SECRET};
use devconnect::backend::auth::TokenService;

#[tokio::test]
async fn test_health_route() {
    let server = test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "API Running");
}

#[tokio::test]
async fn test_register_returns_token_for_new_user() {
    let server = test_server();
    let token = register(&server, "Ada", "ada@example.com").await;

    let (name, value) = token_header(&token);
    let response = server.get("/api/auth").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let user: Value = response.json();
    assert_eq!(user["firstName"], "Ada");
    assert_eq!(user["email"], "ada@example.com");
    assert!(user["avatar"].as_str().unwrap().starts_with("https://www.gravatar.com/avatar/"));
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_twice_is_rejected() {
    let server = test_server();
    register(&server, "Ada", "ada@example.com").await;

    let response = server
        .post("/api/users")
        .json(&registration("Other", "ada@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "errors": [{ "msg": "User already exists" }] }));
}

#[tokio::test]
async fn test_register_email_is_case_insensitive() {
    let server = test_server();
    register(&server, "Ada", "Ada@Example.com").await;

    let response = server
        .post("/api/users")
        .json(&registration("Ada", "ada@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_reports_every_missing_field() {
    let server = test_server();

    let response = server.post("/api/users").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let params: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["param"].as_str().unwrap())
        .collect();
    assert_eq!(
        params,
        vec!["firstName", "lastName", "email", "password", "birthday", "gender"]
    );
}

#[tokio::test]
async fn test_invalid_registration_creates_no_record() {
    let server = test_server();
    let mut body = registration("Ada", "ada@example.com");
    body["password"] = json!("short");

    let response = server.post("/api/users").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        first_error(&response.json()),
        "Please enter a password in range of 6 to 100 characters"
    );

    let login = server
        .post("/api/auth")
        .json(&json!({ "email": "ada@example.com", "password": "short" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::UNAUTHORIZED);

    // The email is still free
    register(&server, "Ada", "ada@example.com").await;
}

#[tokio::test]
async fn test_register_rejects_bad_email_and_birthday() {
    let server = test_server();
    let mut body = registration("Ada", "not-an-email");
    body["birthday"] = json!("someday");

    let response = server.post("/api/users").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["msg"], "Please include a valid email address");
    assert_eq!(body["errors"][1]["param"], "birthday");
}

#[tokio::test]
async fn test_register_rejects_wrongly_typed_password() {
    let server = test_server();
    let mut body = registration("Ada", "ada@example.com");
    body["password"] = json!(1234567);

    let response = server.post("/api/users").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(first_error(&body).contains("invalid type"), "body: {}", body);

    // nothing was stored, so the same email can still register
    register(&server, "Ada", "ada@example.com").await;
}

#[tokio::test]
async fn test_register_rejects_non_json_body() {
    let server = test_server();

    let response = server.post("/api/users").text("firstName=Ada").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_matches!(body["errors"][0]["msg"].as_str(), Some(msg) if msg.contains("Content-Type"));
}

#[tokio::test]
async fn test_login_issues_token() {
    let server = test_server();
    let registered = register(&server, "Ada", "ada@example.com").await;
    let id = user_id(&server, &registered).await;

    let response = server
        .post("/api/auth")
        .json(&json!({ "email": "ada@example.com", "password": "secret123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let token = response.json::<Value>()["token"].as_str().unwrap().to_string();
    assert_eq!(user_id(&server, &token).await, id);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let server = test_server();
    register(&server, "Ada", "ada@example.com").await;

    for body in [
        json!({ "email": "ada@example.com", "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": "secret123" }),
    ] {
        let response = server.post("/api/auth").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>(), json!({ "msg": "Invalid Credentials" }));
    }
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let server = test_server();

    let response = server.get("/api/auth").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "msg": "No token, authorization denied" })
    );
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let server = test_server();
    let (name, value) = token_header("not.a.token");

    let response = server.get("/api/posts").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "msg": "Token is not valid" }));
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let server = test_server();
    let tokens = TokenService::new(TEST_SECRET);
    let stale = tokens
        .issue_at(Uuid::new_v4(), Utc::now() - Duration::hours(2))
        .unwrap();
    let (name, value) = token_header(&stale);

    let response = server.get("/api/auth").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["msg"], "Token is not valid");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let server = test_server();
    let forged = TokenService::new("some-other-secret").issue(Uuid::new_v4()).unwrap();
    let (name, value) = token_header(&forged);

    let response = server.get("/api/auth").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let server = test_server();
    let token = register(&server, "Ada", "ada@example.com").await;

    let response = server
        .get("/api/auth")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = test_server();

    let response = server.get("/api/nothing-here").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_matches!(response.json::<Value>().get("msg"), Some(_));
}
