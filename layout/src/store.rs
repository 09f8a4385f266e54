//! Layout store: the edit session for one room.
//!
//! DESIGN
//! ======
//! A `LayoutStore` is constructed per editing context and passed by `&mut` to
//! whatever handles user input. It owns the ordered block list exclusively,
//! so no locking is involved; save and load are the only async operations and
//! the caller awaits them before handling the next event.
//!
//! Every mutating operation except `rename_block` is gated by edit mode.
//! Rejected edits leave the session untouched and come back as an
//! [`EditError`] that the caller is free to ignore.
//!
//! LOAD POLICY
//! ===========
//! A failed load clears the block list, leaves edit mode off and returns the
//! error, so the UI both shows an empty canvas and can tell the user why.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::{debug, info, warn};

use crate::assign;
use crate::consts::{DEFAULT_GRID_SIZE, DEFAULT_LAYOUT_NAME, LAYOUT_ID, STAGE_MARGIN_X, STAGE_MARGIN_Y};
use crate::doc::{Block, BlockId, BlockKind, Layout, new_block_id};
use crate::error::EditError;
use crate::geom::Point;
use crate::placement::{self, Candidate};
use crate::repo::{LayoutRepository, PersistenceError};

/// Visible stage size, fixed when the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageConfig {
    pub width: f64,
    pub height: f64,
}

impl StageConfig {
    /// Derive the stage from the window size, leaving room for margins and the toolbar.
    #[must_use]
    pub fn from_window(window_width: f64, window_height: f64) -> Self {
        Self {
            width: (window_width - STAGE_MARGIN_X).max(0.0),
            height: (window_height - STAGE_MARGIN_Y).max(0.0),
        }
    }
}

/// Edit session state for one layout.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    blocks: Vec<Block>,
    is_edit_mode: bool,
    selected_id: Option<BlockId>,
    is_adding_seat: bool,
    is_adding_employee: bool,
    grid_size: f64,
    stage: StageConfig,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

impl LayoutStore {
    /// Empty session on the default grid.
    #[must_use]
    pub fn new(stage: StageConfig) -> Self {
        Self {
            blocks: Vec::new(),
            is_edit_mode: false,
            selected_id: None,
            is_adding_seat: false,
            is_adding_employee: false,
            grid_size: DEFAULT_GRID_SIZE,
            stage,
        }
    }

    /// Empty session on a custom grid.
    ///
    /// # Errors
    ///
    /// `InvalidGridSize` unless `grid_size` is finite and positive.
    pub fn with_grid_size(grid_size: f64, stage: StageConfig) -> Result<Self, EditError> {
        if !grid_size.is_finite() || grid_size <= 0.0 {
            warn!(grid_size, "rejected grid size");
            return Err(EditError::InvalidGridSize);
        }
        Ok(Self { grid_size, ..Self::new(stage) })
    }

    // --- Queries ---

    /// Blocks in insertion order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Number of blocks of `kind`.
    #[must_use]
    pub fn count_of(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind == kind).count()
    }

    #[must_use]
    pub fn is_edit_mode(&self) -> bool {
        self.is_edit_mode
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    #[must_use]
    pub fn is_adding_seat(&self) -> bool {
        self.is_adding_seat
    }

    #[must_use]
    pub fn is_adding_employee(&self) -> bool {
        self.is_adding_employee
    }

    #[must_use]
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    #[must_use]
    pub fn stage(&self) -> StageConfig {
        self.stage
    }

    // --- Mode ---

    /// Flip edit mode and return the new state. Leaving edit mode drops the
    /// selection and both adding flags.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.is_edit_mode = !self.is_edit_mode;
        if !self.is_edit_mode {
            self.selected_id = None;
            self.is_adding_seat = false;
            self.is_adding_employee = false;
        }
        debug!(edit_mode = self.is_edit_mode, "edit mode toggled");
        self.is_edit_mode
    }

    pub fn set_adding_seat_mode(&mut self, flag: bool) {
        self.is_adding_seat = flag;
    }

    pub fn set_adding_employee_mode(&mut self, flag: bool) {
        self.is_adding_employee = flag;
    }

    // --- Edits ---

    /// Place a new block of `kind` centred on the snapped click point.
    ///
    /// # Errors
    ///
    /// `NotInEditMode` outside edit mode, `InvalidCoordinate` for a NaN or
    /// infinite click, `Overlap` when the box collides with a block of the
    /// same kind.
    pub fn add_block(&mut self, x: f64, y: f64, kind: BlockKind) -> Result<Block, EditError> {
        self.ensure_edit_mode("add_block")?;
        ensure_finite(x, y)?;
        let candidate = placement::candidate_at(Point::new(x, y), kind, self.grid_size);
        self.insert(candidate)
    }

    /// Seat a new employee on the free slot nearest to the click.
    ///
    /// The employee is centred exactly on the slot centre.
    ///
    /// # Errors
    ///
    /// `NotInEditMode`, `InvalidCoordinate`, `NoFreeSlot`, `NoSuitableSlot`,
    /// or `Overlap` if the slot centre is crowded by another employee.
    pub fn place_employee_nearest(&mut self, x: f64, y: f64) -> Result<Block, EditError> {
        self.ensure_edit_mode("place_employee_nearest")?;
        ensure_finite(x, y)?;
        let center = assign::place_employee_nearest(Point::new(x, y), &self.blocks).inspect_err(|e| {
            debug!(x, y, error = %e, "employee placement rejected");
        })?;
        let candidate = placement::candidate_centered(center, BlockKind::Employee, self.grid_size);
        self.insert(candidate)
    }

    /// Remove a block, clearing the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// `NotInEditMode`, or `NotFound` for an unknown id.
    pub fn delete_block(&mut self, id: &str) -> Result<Block, EditError> {
        self.ensure_edit_mode("delete_block")?;
        let index = self.index_of(id)?;
        let removed = self.blocks.remove(index);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        debug!(id, kind = %removed.kind, "block deleted");
        Ok(removed)
    }

    /// Select a block, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// `NotInEditMode`, or `NotFound` for an unknown id.
    pub fn set_selected(&mut self, id: Option<&str>) -> Result<(), EditError> {
        self.ensure_edit_mode("set_selected")?;
        if let Some(id) = id {
            self.index_of(id)?;
        }
        self.selected_id = id.map(str::to_owned);
        Ok(())
    }

    /// Move a block's top-left corner to the snapped `(x, y)`.
    ///
    /// Moves are unconditional: same-kind overlap is not checked.
    ///
    /// # Errors
    ///
    /// `NotInEditMode`, `InvalidCoordinate`, or `NotFound` for an unknown id.
    pub fn move_block(&mut self, id: &str, x: f64, y: f64) -> Result<Block, EditError> {
        self.ensure_edit_mode("move_block")?;
        ensure_finite(x, y)?;
        let index = self.index_of(id)?;
        let grid = self.grid_size;
        let block = &mut self.blocks[index];
        block.x = placement::snap_to_grid(x, grid);
        block.y = placement::snap_to_grid(y, grid);
        debug!(id, x = block.x, y = block.y, "block moved");
        Ok(block.clone())
    }

    /// Change a block's label. Allowed in and out of edit mode.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn rename_block(&mut self, id: &str, label: impl Into<String>) -> Result<Block, EditError> {
        let index = self.index_of(id)?;
        let block = &mut self.blocks[index];
        block.label = label.into();
        Ok(block.clone())
    }

    // --- Persistence ---

    /// Snapshot the block list as a layout document.
    #[must_use]
    pub fn to_layout(&self, id: &str, name: &str) -> Layout {
        Layout::new(id, name, self.blocks.clone())
    }

    /// Save the blocks as the default layout.
    ///
    /// # Errors
    ///
    /// Propagates the repository failure unchanged.
    pub async fn save_layout(&self, repo: &dyn LayoutRepository) -> Result<Layout, PersistenceError> {
        self.save_room(repo, LAYOUT_ID, DEFAULT_LAYOUT_NAME).await
    }

    /// Save the blocks as the room `id`.
    ///
    /// # Errors
    ///
    /// Propagates the repository failure unchanged.
    pub async fn save_room(&self, repo: &dyn LayoutRepository, id: &str, name: &str) -> Result<Layout, PersistenceError> {
        let count = self.blocks.len();
        match repo.write_layout(self.to_layout(id, name)).await {
            Ok(saved) => {
                info!(room = id, blocks = count, "layout saved");
                Ok(saved)
            }
            Err(e) => {
                warn!(room = id, error = %e, "layout save failed");
                Err(e)
            }
        }
    }

    /// Replace the blocks with the stored default layout and leave edit mode.
    ///
    /// # Errors
    ///
    /// Propagates the repository failure after clearing the block list.
    pub async fn load_layout(&mut self, repo: &dyn LayoutRepository) -> Result<(), PersistenceError> {
        self.load_room(repo, LAYOUT_ID).await.map(drop)
    }

    /// Replace the blocks with the stored room `id` and leave edit mode.
    ///
    /// Returns the stored room name. A room that was never saved loads as
    /// empty and yields `None`.
    ///
    /// # Errors
    ///
    /// Propagates the repository failure after clearing the block list.
    pub async fn load_room(&mut self, repo: &dyn LayoutRepository, id: &str) -> Result<Option<String>, PersistenceError> {
        let result = repo.read_layout(id).await;
        self.is_edit_mode = false;
        self.selected_id = None;
        self.is_adding_seat = false;
        self.is_adding_employee = false;
        match result {
            Ok(Some(layout)) => {
                self.blocks = layout.blocks;
                info!(room = id, blocks = self.blocks.len(), "layout loaded");
                Ok(Some(layout.name))
            }
            Ok(None) => {
                self.blocks.clear();
                info!(room = id, "layout not stored yet; starting empty");
                Ok(None)
            }
            Err(e) => {
                self.blocks.clear();
                warn!(room = id, error = %e, "layout load failed; canvas reset");
                Err(e)
            }
        }
    }

    // --- Internals ---

    fn ensure_edit_mode(&self, op: &'static str) -> Result<(), EditError> {
        if self.is_edit_mode {
            Ok(())
        } else {
            debug!(op, "ignored outside edit mode");
            Err(EditError::NotInEditMode)
        }
    }

    fn index_of(&self, id: &str) -> Result<usize, EditError> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| EditError::NotFound(id.to_owned()))
    }

    fn insert(&mut self, candidate: Candidate) -> Result<Block, EditError> {
        if placement::has_overlap_with_same_type(&candidate, &self.blocks) {
            debug!(kind = %candidate.kind, x = candidate.rect.x, y = candidate.rect.y, "placement overlaps");
            return Err(EditError::Overlap(candidate.kind));
        }
        let kind = candidate.kind;
        let block = Block {
            id: new_block_id(),
            x: candidate.rect.x,
            y: candidate.rect.y,
            width: candidate.rect.width,
            height: candidate.rect.height,
            label: format!("{} {}", kind.label_prefix(), self.count_of(kind) + 1),
            kind,
            props: serde_json::Map::new(),
        };
        debug!(id = %block.id, kind = %kind, x = block.x, y = block.y, "block added");
        self.blocks.push(block.clone());
        Ok(block)
    }
}

fn ensure_finite(x: f64, y: f64) -> Result<(), EditError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        debug!(x, y, "non-finite coordinates rejected");
        Err(EditError::InvalidCoordinate)
    }
}
