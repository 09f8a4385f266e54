//! Reasons an edit operation was rejected.
//!
//! A rejected edit never changes the session. Callers that only care about
//! the resulting state may ignore the error; the editor surfaces the
//! assignment failures to the user.

use crate::doc::{BlockId, BlockKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("layout is not in edit mode")]
    NotInEditMode,
    #[error("block not found: {0}")]
    NotFound(BlockId),
    #[error("placement overlaps an existing {0} block")]
    Overlap(BlockKind),
    #[error("every slot already has an employee")]
    NoFreeSlot,
    #[error("no suitable slot found for the employee")]
    NoSuitableSlot,
    #[error("grid size must be a positive finite number")]
    InvalidGridSize,
    #[error("coordinates must be finite numbers")]
    InvalidCoordinate,
}
