//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use watchdog_auth::{JwtDecoder, JwtEncoder};
use watchdog_core::config::AppConfig;
use watchdog_core::traits::Notifier;
use watchdog_core::types::id::UserId;
use watchdog_database::DatabasePool;
use watchdog_database::repositories::{TimerRepository, UserRepository};
use watchdog_entity::user::User;
use watchdog_service::{AccessService, TimerService, UserService};
use watchdog_worker::ExpiryScanner;

/// Notifier that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(UserId, String)>>,
}

impl RecordingNotifier {
    /// Every message delivered so far, oldest first.
    pub fn messages(&self) -> Vec<(UserId, String)> {
        self.messages.lock().unwrap().clone()
    }

    /// Messages delivered to one user.
    pub fn messages_for(&self, user_id: UserId) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, message)| message)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, user_id: UserId, message: String) {
        self.messages.lock().unwrap().push((user_id, message));
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// User management
    pub users: Arc<UserService>,
    /// Expiry scanner sharing the app's database and notifier
    pub scanner: ExpiryScanner,
    /// Captured notifications
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    /// Create a new test application on a private in-memory database
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(mut config: AppConfig) -> Self {
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let db = DatabasePool::in_memory()
            .await
            .expect("Failed to open test database");
        watchdog_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
        let timer_repo = Arc::new(TimerRepository::new(db.pool().clone()));
        let notifier = Arc::new(RecordingNotifier::default());
        let dyn_notifier: Arc<dyn Notifier> = notifier.clone();

        let timer_service = Arc::new(TimerService::new(
            Arc::clone(&timer_repo),
            Arc::clone(&dyn_notifier),
        ));
        let access_service = Arc::new(AccessService::new(
            Arc::clone(&user_repo),
            Arc::clone(&timer_repo),
            Arc::new(JwtEncoder::new(&config.auth).unwrap()),
            Arc::new(JwtDecoder::new(&config.auth)),
        ));
        let scanner = ExpiryScanner::new(timer_repo, dyn_notifier, &config.scanner);

        let state = watchdog_api::AppState::new(
            Arc::new(config.clone()),
            db,
            timer_service,
            access_service,
            None,
        );

        Self {
            router: watchdog_api::build_app(state),
            config,
            users: Arc::new(UserService::new(user_repo)),
            scanner,
            notifier,
        }
    }

    /// Create a user linked to a chat address
    pub async fn create_user(&self, name: &str) -> User {
        self.users
            .create_user(name, Some(&format!("chat-{name}")))
            .await
            .expect("Failed to create test user")
    }

    /// Exchange an access key for a session token
    pub async fn login(&self, access_key: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({ "key": access_key })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prebuilt request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

/// Unix seconds now
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `Set-Cookie` header, when present
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
