//! Integration tests for login and credential handling.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use helpers::TestApp;

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "key": user.access_key })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.data()["token"].as_str().unwrap();
    assert!(response.data()["expires_at"].is_string());

    let cookie = response.set_cookie.as_deref().expect("login sets a cookie");
    assert!(cookie.starts_with(&format!("{}={token}", app.config.auth.cookie_name)));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_unknown_key() {
    let app = TestApp::new().await;
    app.create_user("alice").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "key": "not-a-key" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_login_missing_key() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/login", Some(serde_json::json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_credential_is_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/timers", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_session_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/timers", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;
    let token = app.login(&user.access_key).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/timers")
        .header(
            header::COOKIE,
            format!("{}={token}", app.config.auth.cookie_name),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data().is_array());
}

#[tokio::test]
async fn test_invalid_kick_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/kick/garbage", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_session_token_cannot_kick() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;
    let token = app.login(&user.access_key).await;

    let response = app
        .request("POST", &format!("/kick/{token}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_kick_token_cannot_open_session() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;
    let token = app.login(&user.access_key).await;

    let created = app
        .request(
            "POST",
            "/api/timers",
            Some(serde_json::json!({ "name": "nightly", "interval": 60 })),
            Some(&token),
        )
        .await;
    let id = created.data()["timerid"].as_i64().unwrap();
    let issued = app
        .request("GET", &format!("/api/timers/{id}/token"), None, Some(&token))
        .await;
    let action_token = issued.data()["token"].as_str().unwrap().to_string();

    let response = app
        .request("GET", "/api/timers", None, Some(&action_token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_kick_token_for_deleted_timer() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;
    let token = app.login(&user.access_key).await;

    let created = app
        .request(
            "POST",
            "/api/timers",
            Some(serde_json::json!({ "name": "short-lived", "interval": 60 })),
            Some(&token),
        )
        .await;
    let id = created.data()["timerid"].as_i64().unwrap();
    let issued = app
        .request("GET", &format!("/api/timers/{id}/token"), None, Some(&token))
        .await;
    let kick_url = issued.data()["kick_url"].as_str().unwrap().to_string();

    app.request("DELETE", &format!("/api/timers/{id}"), None, Some(&token))
        .await;

    let response = app.request("POST", &kick_url, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
