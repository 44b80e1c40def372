//! `AuthUser` extractor. Reads the session credential from the
//! `Authorization` header or the session cookie and resolves it to a user.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use watchdog_core::error::AppError;
use watchdog_core::types::id::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user behind the current request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    /// Returns the user id.
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = credential_from_parts(parts, &state.config.auth.cookie_name)
            .ok_or_else(|| AppError::authentication("Missing credential"))?;

        let user_id = state.access_service.resolve_bearer_to_user(&credential)?;
        Ok(AuthUser(user_id))
    }
}

/// Bearer header first, then the named cookie.
fn credential_from_parts(parts: &Parts, cookie_name: &str) -> Option<String> {
    let from_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(strip_bearer);

    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(cookie_name)
        .map(|cookie| cookie.value())
        .map(|value| strip_bearer(value).unwrap_or(value).trim().to_string())
        .filter(|token| !token.is_empty())
}

fn strip_bearer(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
