//! Kick-link handler. Authorized by the action token alone.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::{ApiResponse, TimerResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET|POST /kick/{token}
pub async fn kick_with_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<TimerResponse>>, ApiError> {
    let (timer_id, user_id) = state.access_service.resolve_action_token(&token)?;
    let timer = state.timer_service.kick(user_id, timer_id).await?;
    Ok(Json(ApiResponse::ok(timer.into())))
}
