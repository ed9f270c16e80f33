//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use snakk_shared::time::{elapsed_since, format_uptime};

use crate::{
    domain::User,
    infrastructure::dto::http::{RoomSnapshotDto, StatusDto},
    ui::state::AppState,
};

const ROOM_PAGE: &str = include_str!("../../../assets/index.html");
const FAVICON: &[u8] = include_bytes!("../../../assets/favicon.ico");

pub const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /\n";

/// Room page
pub async fn room_page() -> Html<&'static str> {
    Html(ROOM_PAGE)
}

pub async fn favicon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/x-icon")], FAVICON)
}

/// Users holding a nickname, read straight from the registry
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.registry.snapshot().await)
}

/// Roster and history, answered by the coordinator
pub async fn room_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomSnapshotDto>, StatusCode> {
    match state.coordinator.snapshot().await {
        Ok(snapshot) => Ok(Json(RoomSnapshotDto {
            users: snapshot.users,
            history: snapshot.history,
        })),
        Err(e) => {
            tracing::error!("Failed to query room snapshot: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let uptime = elapsed_since(state.clock.as_ref(), state.started_at);
    Json(StatusDto {
        up_time: format_uptime(uptime),
        clients_connected: state.open_connections(),
        users_online: state.registry.len().await,
        history_capacity: state.history_capacity,
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn robots_txt() -> &'static str {
    ROBOTS_TXT
}
