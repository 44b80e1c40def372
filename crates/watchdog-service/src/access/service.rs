//! Access layer: exchanges access keys for session credentials, resolves
//! credentials to users, and mints timer-scoped action tokens.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use watchdog_auth::jwt::{JwtDecoder, JwtEncoder};
use watchdog_core::error::AppError;
use watchdog_core::types::id::{TimerId, UserId};
use watchdog_database::repositories::{TimerRepository, UserRepository};

/// A freshly issued session credential.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredential {
    /// The user the credential names.
    pub user_id: UserId,
    /// Signed session token.
    pub token: String,
    /// When the credential stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// A signed capability to kick exactly one timer.
#[derive(Debug, Clone, Serialize)]
pub struct ActionToken {
    /// Signed token string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Credential issuance and resolution.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Timer repository.
    timer_repo: Arc<TimerRepository>,
    /// Token signer.
    encoder: Arc<JwtEncoder>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        timer_repo: Arc<TimerRepository>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            timer_repo,
            encoder,
            decoder,
        }
    }

    /// Resolve a session credential to the user it names.
    pub fn resolve_bearer_to_user(&self, credential: &str) -> Result<UserId, AppError> {
        self.decoder.decode_session(credential)
    }

    /// Exchange an access key for a session credential.
    pub async fn issue_login_credential(
        &self,
        access_key: &str,
    ) -> Result<LoginCredential, AppError> {
        let access_key = access_key.trim();
        if access_key.is_empty() {
            return Err(AppError::authentication("Invalid access key"));
        }

        let user = match self.user_repo.find_by_access_key(access_key).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt with unknown access key");
                return Err(AppError::authentication("Invalid access key"));
            }
        };

        let (token, expires_at) = self.encoder.issue_session(user.id)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginCredential {
            user_id: user.id,
            token,
            expires_at,
        })
    }

    /// Mint an action token for a timer owned by `user_id`.
    pub async fn issue_action_token(
        &self,
        timer_id: TimerId,
        user_id: UserId,
    ) -> Result<ActionToken, AppError> {
        self.timer_repo
            .find_by_id_and_owner(timer_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Timer not found"))?;

        let (token, expires_at) = self.encoder.issue_action(user_id, timer_id)?;
        info!(timer_id = %timer_id, user_id = %user_id, "Action token issued");

        Ok(ActionToken { token, expires_at })
    }

    /// Resolve an action token to the `(timer, user)` pair it authorizes.
    pub fn resolve_action_token(&self, token: &str) -> Result<(TimerId, UserId), AppError> {
        let (user_id, timer_id) = self.decoder.decode_action(token)?;
        Ok((timer_id, user_id))
    }
}
