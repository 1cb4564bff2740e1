//! HTTP API endpoint handlers.
//!
//! Read-only views of the registry, for operators and tests.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use roomcast_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{HealthDto, MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        connections: state.repository.count_connections().await,
    })
}

/// Get list of rooms that currently have members
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state
        .repository
        .list_rooms()
        .await
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.room_id.into_string(),
            member_count: room.member_count,
        })
        .collect();

    Json(rooms)
}

/// Get room detail by ID
///
/// A room without members does not exist, so it is reported as 404.
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::from(room_id);
    let members = state.repository.room_members(&room_id).await;

    if members.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    let room_detail = RoomDetailDto {
        id: room_id.into_string(),
        members: members
            .into_iter()
            .map(|m| MemberDetailDto {
                connection_id: m.connection_id.to_string(),
                connected_at: timestamp_to_jst_rfc3339(m.connected_at.value()),
            })
            .collect(),
    };

    Ok(Json(room_detail))
}
