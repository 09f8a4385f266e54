//! Room and layout routes.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use layout::doc::Layout;
use serde::Serialize;
use tracing::{debug, error};

use crate::services::room::RoomError;
use crate::state::AppState;

/// JSON error body: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: &str) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.to_owned() }
    }
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::Invalid(msg) => Self { status: StatusCode::BAD_REQUEST, message: msg.to_owned() },
            other => {
                error!(error = %other, "room storage failure");
                Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: "room storage failure".to_owned() }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "malformed request body");
        Self { status: StatusCode::BAD_REQUEST, message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `GET /api/rooms/layout`: the default layout, created on first access.
pub async fn get_layout(State(state): State<AppState>) -> Result<Json<Layout>, ApiError> {
    Ok(Json(state.rooms.get_layout().await?))
}

/// `POST /api/rooms/layout`: replace the default layout.
pub async fn save_layout(
    State(state): State<AppState>,
    payload: Result<Json<Layout>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(layout) = payload?;
    state.rooms.save_layout(layout).await?;
    Ok(Json(MessageResponse { message: "layout saved" }))
}

/// `GET /api/rooms`: every stored room.
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Layout>>, ApiError> {
    Ok(Json(state.rooms.list_rooms().await?))
}

/// `POST /api/rooms`: insert or replace a room.
pub async fn save_room(
    State(state): State<AppState>,
    payload: Result<Json<Layout>, JsonRejection>,
) -> Result<Json<Layout>, ApiError> {
    let Json(room) = payload?;
    Ok(Json(state.rooms.save_room(room).await?))
}

/// `GET /api/rooms/:id`: one room.
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Layout>, ApiError> {
    state
        .rooms
        .get_room(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("room not found"))
}
