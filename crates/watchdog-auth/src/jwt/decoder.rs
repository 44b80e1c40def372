//! JWT token validation.
//!
//! Only HS256 is accepted. Session failures surface as
//! `Authentication`, action-token failures as `InvalidToken`.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use watchdog_core::config::AuthConfig;
use watchdog_core::error::AppError;
use watchdog_core::types::id::{TimerId, UserId};

use super::claims::{Claims, TokenType};

/// Validates session credentials and action tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode a session credential and return the user it names.
    pub fn decode_session(&self, token: &str) -> Result<UserId, AppError> {
        let claims = self
            .decode_token(token)
            .map_err(|reason| AppError::authentication(format!("Invalid credential: {reason}")))?;

        if claims.typ != TokenType::Session {
            return Err(AppError::authentication(
                "Invalid credential: expected session token",
            ));
        }

        Ok(claims.sub)
    }

    /// Decode an action token and return the `(user, timer)` pair it grants.
    pub fn decode_action(&self, token: &str) -> Result<(UserId, TimerId), AppError> {
        let claims = self
            .decode_token(token)
            .map_err(|reason| AppError::invalid_token(format!("Invalid token: {reason}")))?;

        match (claims.typ, claims.tid) {
            (TokenType::Kick, Some(timer_id)) => Ok((claims.sub, timer_id)),
            _ => Err(AppError::invalid_token(
                "Invalid token: expected kick token",
            )),
        }
    }

    /// Signature, algorithm, and expiry checks shared by both token kinds.
    fn decode_token(&self, token: &str) -> Result<Claims, &'static str> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "token has expired",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "bad signature",
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => "unexpected algorithm",
                    _ => "malformed token",
                }
            })
    }
}
