//! Persistence collaborator for layouts.
//!
//! DESIGN
//! ======
//! Layouts are whole documents: read in one piece, written in one piece.
//! The trait is implemented by the server over a JSON file and by the CLI
//! over the REST transport, so the edit session never knows which side of
//! the wire it is on.

use async_trait::async_trait;

use crate::doc::Layout;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid layout document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid layout: {0}")]
    Invalid(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
}

/// Storage for layouts keyed by id.
#[async_trait]
pub trait LayoutRepository: Send + Sync {
    /// Fetch a layout by id. `Ok(None)` when it was never saved.
    async fn read_layout(&self, id: &str) -> Result<Option<Layout>, PersistenceError>;

    /// Insert or wholesale-replace a layout, returning it as stored.
    ///
    /// Implementations stamp `updated_at` on every write and `created_at` on
    /// first insert.
    async fn write_layout(&self, layout: Layout) -> Result<Layout, PersistenceError>;

    /// Every stored layout, in storage order.
    async fn list_layouts(&self) -> Result<Vec<Layout>, PersistenceError>;
}
