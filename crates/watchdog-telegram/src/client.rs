//! Minimal Telegram Bot API client.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use watchdog_core::config::TelegramConfig;
use watchdog_core::error::{AppError, ErrorKind};

use crate::types::{ApiResponse, BotUser, Message, Update};

/// Extra time allowed on top of the long-poll timeout before the HTTP
/// request itself is abandoned.
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// Client for the Bot API methods Watchdog uses.
#[derive(Clone)]
pub struct TelegramClient {
    /// HTTP client.
    http_client: reqwest::Client,
    /// `{api_url}/bot{token}`.
    base_url: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the base URL embeds the bot token
        f.debug_struct("TelegramClient").finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct GetUpdates {
    offset: i64,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

impl TelegramClient {
    /// Create a client from configuration.
    pub fn new(config: &TelegramConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_seconds) + REQUEST_SLACK)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http_client,
            base_url: format!(
                "{}/bot{}",
                config.api_url.trim_end_matches('/'),
                config.bot_token.trim()
            ),
        })
    }

    /// `getMe`: identity of the bot.
    pub async fn get_me(&self) -> Result<BotUser, AppError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// `sendMessage` to a chat.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Message, AppError> {
        self.call("sendMessage", &SendMessage { chat_id, text }).await
    }

    /// `getUpdates` long poll starting at `offset`.
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, AppError> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout,
                allowed_updates: ["message"],
            },
        )
        .await
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method, "Telegram API call");

        let response = self
            .http_client
            .post(format!("{}/{method}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Telegram {method} request failed"),
                    e.without_url(),
                )
            })?;

        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Telegram {method} returned an unreadable body (HTTP {status})"),
                e.without_url(),
            )
        })?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(AppError::external_service(format!(
                "Telegram {method} failed: {}",
                description.unwrap_or_else(|| format!("HTTP {status}"))
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> TelegramClient {
        TelegramClient::new(&TelegramConfig {
            bot_token: "123:abc".to_string(),
            api_url: server.uri(),
            poll_timeout_seconds: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_me() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"id": 42, "is_bot": true, "first_name": "Watchdog", "username": "watchdog_bot"}
            })))
            .mount(&server)
            .await;

        let me = client(&server).get_me().await.unwrap();
        assert_eq!(me.username.as_deref(), Some("watchdog_bot"));
    }

    #[tokio::test]
    async fn test_send_message_posts_chat_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_partial_json(serde_json::json!({"chat_id": "77", "text": "hi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 1, "chat": {"id": 77}, "text": "hi"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).send_message("77", "hi").await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_is_external_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .mount(&server)
            .await;

        let err = client(&server).send_message("1", "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(err.message.contains("blocked"));
    }

    #[tokio::test]
    async fn test_get_updates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/getUpdates"))
            .and(body_partial_json(serde_json::json!({"offset": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": [{
                    "update_id": 5,
                    "message": {
                        "message_id": 9,
                        "from": {"id": 77, "is_bot": false, "first_name": "Ada"},
                        "chat": {"id": 77},
                        "text": "/start"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let updates = client(&server).get_updates(5, 0).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("/start"));
    }
}
