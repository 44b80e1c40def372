//! Timer management handlers. All require a session.

use axum::Json;
use axum::extract::{Path, State};

use watchdog_core::types::id::TimerId;

use crate::dto::request::CreateTimerRequest;
use crate::dto::response::{ActionTokenResponse, ApiResponse, MessageResponse, TimerResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/timers
pub async fn list_timers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<TimerResponse>>>, ApiError> {
    let timers = state.timer_service.list(auth.user_id()).await?;
    Ok(Json(ApiResponse::ok(
        timers.into_iter().map(TimerResponse::from).collect(),
    )))
}

/// POST /api/timers
pub async fn create_timer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTimerRequest>,
) -> Result<Json<ApiResponse<TimerResponse>>, ApiError> {
    let timer = state
        .timer_service
        .create(auth.user_id(), req.into())
        .await?;
    Ok(Json(ApiResponse::ok(timer.into())))
}

/// GET /api/timers/{id}
pub async fn get_timer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse<TimerResponse>>, ApiError> {
    let timer = state.timer_service.get(auth.user_id(), id).await?;
    Ok(Json(ApiResponse::ok(timer.into())))
}

/// DELETE /api/timers/{id}
pub async fn delete_timer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.timer_service.delete(auth.user_id(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Timer deleted".to_string(),
    })))
}

/// POST|GET /api/timers/{id}/kick
pub async fn kick_timer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse<TimerResponse>>, ApiError> {
    let timer = state.timer_service.kick(auth.user_id(), id).await?;
    Ok(Json(ApiResponse::ok(timer.into())))
}

/// GET /api/timers/{id}/token
pub async fn issue_token(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse<ActionTokenResponse>>, ApiError> {
    let token = state
        .access_service
        .issue_action_token(id, auth.user_id())
        .await?;

    let kick_url = format!(
        "{}/kick/{}",
        state.config.server.normalized_base_path(),
        token.token
    );

    Ok(Json(ApiResponse::ok(ActionTokenResponse {
        token: token.token,
        kick_url,
        expires_at: token.expires_at,
    })))
}
