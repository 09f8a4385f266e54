//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the room store; the store serializes its own writers, so handlers
//! share it through an `Arc` without further locking.

use std::sync::Arc;

use crate::services::room::RoomStore;

/// Shared application state. Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomStore>,
}

impl AppState {
    #[must_use]
    pub fn new(rooms: RoomStore) -> Self {
        Self { rooms: Arc::new(rooms) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
