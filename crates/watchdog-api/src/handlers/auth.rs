//! Login handler.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let credential = state.access_service.issue_login_credential(&req.key).await?;

    let path = match state.config.server.normalized_base_path() {
        base if base.is_empty() => "/".to_string(),
        base => base,
    };
    let cookie = Cookie::build((state.config.auth.cookie_name.clone(), credential.token.clone()))
        .path(path)
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(LoginResponse {
            token: credential.token,
            expires_at: credential.expires_at,
        })),
    ))
}
