//! Room service: JSON-file persistence for layouts.
//!
//! DESIGN
//! ======
//! Every room, including the default layout under the `"layout"` sentinel,
//! lives in one JSON array on disk. Reads parse the whole file; writes
//! rewrite it wholesale. Writers are serialized by a mutex and replace the
//! file through a temp-file rename, so readers never observe a torn document.
//!
//! ERROR HANDLING
//! ==============
//! A missing file is an empty room list. A file that exists but does not
//! parse is an error: it is never silently replaced, since the next write
//! would discard every stored room.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use layout::consts::{DEFAULT_LAYOUT_NAME, LAYOUT_ID};
use layout::doc::Layout;
use layout::repo::{LayoutRepository, PersistenceError};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("invalid room: {0}")]
    Invalid(&'static str),
    #[error("room storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("rooms document is corrupt: {0}")]
    Json(#[from] serde_json::Error),
    #[error("timestamp formatting failed: {0}")]
    Clock(#[from] time::error::Format),
}

impl From<RoomError> for PersistenceError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::Invalid(msg) => Self::Invalid(msg.to_owned()),
            RoomError::Io(e) => Self::Io(e),
            RoomError::Json(e) => Self::Json(e),
            RoomError::Clock(e) => Self::Invalid(e.to_string()),
        }
    }
}

/// File-backed room storage.
pub struct RoomStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

// =============================================================================
// DOCUMENT I/O
// =============================================================================

impl RoomStore {
    /// Open the store at `path`, creating its parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RoomError> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        info!(path = %path.display(), "room store opened");
        Ok(Self { path, write_lock: Mutex::new(()) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_rooms(&self) -> Result<Vec<Layout>, RoomError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "rooms document failed to parse");
            RoomError::Json(e)
        })
    }

    async fn write_rooms(&self, rooms: &[Layout]) -> Result<(), RoomError> {
        let json = serde_json::to_vec_pretty(rooms)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), rooms = rooms.len(), "rooms document written");
        Ok(())
    }

    /// Upsert `room` into `rooms`. Caller must hold `write_lock`.
    async fn upsert_locked(&self, mut rooms: Vec<Layout>, mut room: Layout) -> Result<Layout, RoomError> {
        let now = now_rfc3339()?;
        match rooms.iter_mut().find(|r| r.id == room.id) {
            Some(existing) => {
                room.created_at = existing.created_at.take().or(room.created_at).or_else(|| Some(now.clone()));
                room.updated_at = Some(now);
                *existing = room.clone();
            }
            None => {
                room.created_at = Some(now.clone());
                room.updated_at = Some(now);
                rooms.push(room.clone());
            }
        }
        self.write_rooms(&rooms).await?;
        Ok(room)
    }
}

// =============================================================================
// ROOMS
// =============================================================================

impl RoomStore {
    /// Insert or replace a room, returning it as stored.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if `id` or `name` is blank.
    pub async fn save_room(&self, room: Layout) -> Result<Layout, RoomError> {
        if room.id.trim().is_empty() {
            return Err(RoomError::Invalid("missing id"));
        }
        if room.name.trim().is_empty() {
            return Err(RoomError::Invalid("missing name"));
        }
        let _guard = self.write_lock.lock().await;
        let rooms = self.read_rooms().await?;
        let saved = self.upsert_locked(rooms, room).await?;
        info!(room = %saved.id, blocks = saved.blocks.len(), "room saved");
        Ok(saved)
    }

    /// Fetch one room.
    ///
    /// # Errors
    ///
    /// Returns `Io`/`Json` if the document cannot be read.
    pub async fn get_room(&self, id: &str) -> Result<Option<Layout>, RoomError> {
        let rooms = self.read_rooms().await?;
        Ok(rooms.into_iter().find(|r| r.id == id))
    }

    /// Every stored room, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Io`/`Json` if the document cannot be read.
    pub async fn list_rooms(&self) -> Result<Vec<Layout>, RoomError> {
        self.read_rooms().await
    }
}

// =============================================================================
// DEFAULT LAYOUT
// =============================================================================

impl RoomStore {
    /// Fetch the default layout, creating and persisting an empty one if absent.
    ///
    /// # Errors
    ///
    /// Returns `Io`/`Json` if the document cannot be read or written.
    pub async fn get_layout(&self) -> Result<Layout, RoomError> {
        if let Some(layout) = self.get_room(LAYOUT_ID).await? {
            return Ok(layout);
        }
        let _guard = self.write_lock.lock().await;
        let rooms = self.read_rooms().await?;
        if let Some(layout) = rooms.iter().find(|r| r.id == LAYOUT_ID) {
            return Ok(layout.clone());
        }
        info!("default layout created");
        self.upsert_locked(rooms, Layout::new(LAYOUT_ID, DEFAULT_LAYOUT_NAME, Vec::new()))
            .await
    }

    /// Save `layout` as the default layout. The id is forced to the sentinel
    /// and a blank name falls back to the default name.
    ///
    /// # Errors
    ///
    /// Returns `Io`/`Json` if the document cannot be read or written.
    pub async fn save_layout(&self, mut layout: Layout) -> Result<Layout, RoomError> {
        LAYOUT_ID.clone_into(&mut layout.id);
        if layout.name.trim().is_empty() {
            DEFAULT_LAYOUT_NAME.clone_into(&mut layout.name);
        }
        self.save_room(layout).await
    }
}

#[async_trait]
impl LayoutRepository for RoomStore {
    async fn read_layout(&self, id: &str) -> Result<Option<Layout>, PersistenceError> {
        Ok(self.get_room(id).await?)
    }

    async fn write_layout(&self, layout: Layout) -> Result<Layout, PersistenceError> {
        Ok(self.save_room(layout).await?)
    }

    async fn list_layouts(&self) -> Result<Vec<Layout>, PersistenceError> {
        Ok(self.list_rooms().await?)
    }
}

fn now_rfc3339() -> Result<String, RoomError> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;
