//! Integration tests for the timer lifecycle over HTTP.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestApp, now};

#[tokio::test]
async fn test_full_lifecycle() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;
    let token = app.login(&user.access_key).await;

    // create
    let created = app
        .request(
            "POST",
            "/api/timers",
            Some(serde_json::json!({ "name": "Test1", "interval": 1 })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    assert_eq!(created.data()["name"], "Test1");
    assert_eq!(created.data()["interval"], 1);
    assert_eq!(created.data()["state"], "new");
    assert!(created.data()["expiry"].is_null());
    let id = created.data()["timerid"].as_i64().unwrap();

    // kick
    let before = now();
    let kicked = app
        .request("POST", &format!("/api/timers/{id}/kick"), None, Some(&token))
        .await;
    assert_eq!(kicked.status, StatusCode::OK);
    assert_eq!(kicked.data()["state"], "running");
    let expiry = kicked.data()["expiry"].as_i64().unwrap();
    assert!(expiry >= before + 1 && expiry <= now() + 1);

    // expire
    let outcome = app.scanner.scan_at(expiry + 1).await.unwrap();
    assert_eq!(outcome.expired(), 1);

    let fetched = app
        .request("GET", &format!("/api/timers/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.data()["state"], "expired");

    // kick with an action token, no session
    let issued = app
        .request("GET", &format!("/api/timers/{id}/token"), None, Some(&token))
        .await;
    assert_eq!(issued.status, StatusCode::OK);
    let kick_url = issued.data()["kick_url"].as_str().unwrap().to_string();
    assert!(kick_url.starts_with("/kick/"));

    let revived = app.request("GET", &kick_url, None, None).await;
    assert_eq!(revived.status, StatusCode::OK, "{:?}", revived.body);
    assert_eq!(revived.data()["state"], "running");
    assert_eq!(revived.data()["timerid"].as_i64(), Some(id));

    // delete
    let deleted = app
        .request("DELETE", &format!("/api/timers/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/timers/{id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    assert_eq!(
        app.notifier.messages_for(user.id),
        vec![
            "Timer 'Test1' created",
            "Timer 'Test1' kicked",
            "Timer 'Test1' has expired",
            "Expired timer 'Test1' kicked",
            "Timer 'Test1' deleted",
        ]
    );
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let alice_token = app.login(&alice.access_key).await;
    let bob_token = app.login(&bob.access_key).await;

    for name in ["backup", "heartbeat"] {
        app.request(
            "POST",
            "/api/timers",
            Some(serde_json::json!({ "name": name, "interval": 60 })),
            Some(&alice_token),
        )
        .await;
    }

    let mine = app.request("GET", "/api/timers", None, Some(&alice_token)).await;
    let names: Vec<&str> = mine
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["backup", "heartbeat"]);

    let theirs = app.request("GET", "/api/timers", None, Some(&bob_token)).await;
    assert_eq!(theirs.status, StatusCode::OK);
    assert!(theirs.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_foreign_timer_looks_missing() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let mallory = app.create_user("mallory").await;
    let alice_token = app.login(&alice.access_key).await;
    let mallory_token = app.login(&mallory.access_key).await;

    let created = app
        .request(
            "POST",
            "/api/timers",
            Some(serde_json::json!({ "name": "private", "interval": 60 })),
            Some(&alice_token),
        )
        .await;
    let id = created.data()["timerid"].as_i64().unwrap();

    for (method, path) in [
        ("GET", format!("/api/timers/{id}")),
        ("POST", format!("/api/timers/{id}/kick")),
        ("GET", format!("/api/timers/{id}/token")),
        ("DELETE", format!("/api/timers/{id}")),
    ] {
        let response = app.request(method, &path, None, Some(&mallory_token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method} {path}");
    }

    let still_there = app
        .request("GET", &format!("/api/timers/{id}"), None, Some(&alice_token))
        .await;
    assert_eq!(still_there.data()["state"], "new");
    assert!(app.notifier.messages_for(mallory.id).is_empty());
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;
    let token = app.login(&user.access_key).await;

    for body in [
        serde_json::json!({ "name": "zero", "interval": 0 }),
        serde_json::json!({ "name": "negative", "interval": -5 }),
        serde_json::json!({ "name": "   ", "interval": 60 }),
    ] {
        let response = app
            .request("POST", "/api/timers", Some(body.clone()), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    let list = app.request("GET", "/api/timers", None, Some(&token)).await;
    assert!(list.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_new_timer_is_never_expired() {
    let app = TestApp::new().await;
    let user = app.create_user("alice").await;
    let token = app.login(&user.access_key).await;

    let created = app
        .request(
            "POST",
            "/api/timers",
            Some(serde_json::json!({ "name": "idle", "interval": 1 })),
            Some(&token),
        )
        .await;
    let id = created.data()["timerid"].as_i64().unwrap();

    let outcome = app.scanner.scan_at(now() + 3600).await.unwrap();
    assert_eq!(outcome.expired(), 0);

    let fetched = app
        .request("GET", &format!("/api/timers/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.data()["state"], "new");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "connected");
}
