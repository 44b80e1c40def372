//! JWT token creation with configurable TTLs.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use watchdog_core::config::AuthConfig;
use watchdog_core::error::AppError;
use watchdog_core::types::id::{TimerId, UserId};

use super::claims::{Claims, TokenType};

/// Creates signed HS256 session credentials and action tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session credential lifetime.
    session_ttl: Duration,
    /// Action token lifetime.
    action_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("session_ttl", &self.session_ttl)
            .field("action_ttl", &self.action_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails when a configured TTL does not fit a duration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            session_ttl: ttl_hours("auth.session_ttl_hours", config.session_ttl_hours)?,
            action_ttl: ttl_hours("auth.action_token_ttl_hours", config.action_token_ttl_hours)?,
        })
    }

    /// Issue a session credential for `user_id`.
    pub fn issue_session(&self, user_id: UserId) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = expires(now, self.session_ttl)?;
        let claims = Claims {
            sub: user_id,
            tid: None,
            typ: TokenType::Session,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        Ok((self.sign(&claims)?, exp))
    }

    /// Issue an action token that can only kick `timer_id` on behalf of `user_id`.
    pub fn issue_action(
        &self,
        user_id: UserId,
        timer_id: TimerId,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = expires(now, self.action_ttl)?;
        let claims = Claims {
            sub: user_id,
            tid: Some(timer_id),
            typ: TokenType::Kick,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        Ok((self.sign(&claims)?, exp))
    }

    /// Sign arbitrary claims with the configured key.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}

fn ttl_hours(key: &str, hours: u64) -> Result<Duration, AppError> {
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .ok_or_else(|| AppError::configuration(format!("{key} is out of range: {hours}")))
}

fn expires(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, AppError> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| AppError::internal("Token expiry is out of range"))
}
