//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the REST endpoints the seating editor talks to. Every
//! API route lives under `/api`; `/healthz` is left bare for probes.

pub mod rooms;

use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::http::header::InvalidHeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
///
/// `cors_origin` restricts CORS to one origin; `None` allows any.
///
/// # Errors
///
/// Returns an error if `cors_origin` is not a valid header value.
pub fn app(state: AppState, cors_origin: Option<&str>) -> Result<Router, InvalidHeaderValue> {
    let origin = match cors_origin {
        Some(origin) => AllowOrigin::exact(HeaderValue::from_str(origin)?),
        None => AllowOrigin::from(Any),
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/api/rooms", get(rooms::list_rooms).post(rooms::save_room))
        .route("/api/rooms/layout", get(rooms::get_layout).post(rooms::save_layout))
        .route("/api/rooms/{id}", get(rooms::get_room))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
