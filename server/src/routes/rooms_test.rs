use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers;

async fn call(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let app = crate::routes::app(state.clone(), None).unwrap();
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

fn seat_json(id: &str) -> Value {
    json!({"id": id, "x": -10.0, "y": -10.0, "width": 100.0, "height": 100.0, "label": "Seat 1", "type": "slot"})
}

// =============================================================================
// ApiError
// =============================================================================

#[test]
fn invalid_room_maps_to_bad_request() {
    let err = ApiError::from(RoomError::Invalid("missing id"));
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "missing id");
}

#[test]
fn storage_failure_maps_to_internal_error_without_detail() {
    let err = ApiError::from(RoomError::Io(std::io::Error::other("disk gone")));
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!err.message.contains("disk gone"));
}

// =============================================================================
// Routes
// =============================================================================

#[tokio::test]
async fn healthz_is_ok() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let (status, _) = call(&state, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn get_layout_creates_default() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let (status, body) = call(&state, Method::GET, "/api/rooms/layout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "layout");
    assert_eq!(body["blocks"], json!([]));
    assert!(body["createdAt"].is_string());

    let (_, rooms) = call(&state, Method::GET, "/api/rooms", None).await;
    assert_eq!(rooms.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn post_layout_forces_sentinel_and_round_trips() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let body = json!({"id": "whatever", "name": "Office", "blocks": [seat_json("s1")]});
    let (status, reply) = call(&state, Method::POST, "/api/rooms/layout", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["message"], "layout saved");

    let (_, layout) = call(&state, Method::GET, "/api/rooms/layout", None).await;
    assert_eq!(layout["name"], "Office");
    assert_eq!(layout["blocks"][0], seat_json("s1"));

    let (status, _) = call(&state, Method::GET, "/api/rooms/whatever", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_room_returns_stored_room() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let body = json!({"id": "floor-2", "name": "Second floor", "blocks": []});
    let (status, room) = call(&state, Method::POST, "/api/rooms", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["id"], "floor-2");
    assert!(room["updatedAt"].is_string());

    let (status, fetched) = call(&state, Method::GET, "/api/rooms/floor-2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, room);
}

#[tokio::test]
async fn post_room_without_name_is_bad_request() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let body = json!({"id": "floor-2", "name": ""});
    let (status, reply) = call(&state, Method::POST, "/api/rooms", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(reply["error"].is_string());
}

#[tokio::test]
async fn post_room_without_id_key_is_bad_request_json() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let body = json!({"name": "R", "blocks": []});
    let (status, reply) = call(&state, Method::POST, "/api/rooms", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply["error"], "missing id");

    let (_, rooms) = call(&state, Method::GET, "/api/rooms", None).await;
    assert_eq!(rooms, json!([]));
}

#[tokio::test]
async fn post_layout_without_id_or_name_uses_defaults() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let body = json!({"blocks": [seat_json("s1")]});
    let (status, _) = call(&state, Method::POST, "/api/rooms/layout", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, layout) = call(&state, Method::GET, "/api/rooms/layout", None).await;
    assert_eq!(layout["name"], "Default layout");
    assert_eq!(layout["blocks"][0], seat_json("s1"));
}

#[tokio::test]
async fn malformed_body_is_bad_request_json() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let app = crate::routes::app(state.clone(), None).unwrap();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/rooms")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"id\": 7"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(reply["error"].is_string());
}

#[tokio::test]
async fn wrong_field_type_is_bad_request_json() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let body = json!({"id": "r", "name": "R", "blocks": "nope"});
    let (status, reply) = call(&state, Method::POST, "/api/rooms", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(reply["error"].is_string());
}

#[tokio::test]
async fn unknown_room_is_not_found_json() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let (status, reply) = call(&state, Method::GET, "/api/rooms/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(reply["error"], "room not found");
}

#[tokio::test]
async fn presentation_keys_survive_save_and_load() {
    let (_dir, state) = test_helpers::test_app_state().await;
    let mut block = seat_json("s1");
    block["fill"] = json!("#4caf50");
    let body = json!({"id": "r", "name": "R", "blocks": [block]});
    call(&state, Method::POST, "/api/rooms", Some(body)).await;

    let (_, room) = call(&state, Method::GET, "/api/rooms/r", None).await;
    assert_eq!(room["blocks"][0]["fill"], "#4caf50");
}
