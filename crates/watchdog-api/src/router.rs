//! Route definitions for the Watchdog HTTP API.
//!
//! Timer management lives under `/api`; login and kick links sit at the
//! root. Everything is mounted under `server.base_path` when one is set.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, without middleware.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/kick/{token}",
            get(handlers::kick::kick_with_token).post(handlers::kick::kick_with_token),
        )
        .nest("/api", api_routes());

    match state.config.server.normalized_base_path() {
        base if base.is_empty() => routes,
        base => Router::new().nest(&base, routes),
    }
}

/// Session-authenticated timer endpoints plus health.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/timers",
            get(handlers::timer::list_timers).post(handlers::timer::create_timer),
        )
        .route(
            "/timers/{id}",
            get(handlers::timer::get_timer).delete(handlers::timer::delete_timer),
        )
        .route(
            "/timers/{id}/kick",
            post(handlers::timer::kick_timer).get(handlers::timer::kick_timer),
        )
        .route("/timers/{id}/token", get(handlers::timer::issue_token))
        .route("/health", get(handlers::health::health))
}
