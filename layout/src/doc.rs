//! Document model: placed blocks and the layout that persists them.
//!
//! `Block` is the unit the editor places on the grid. `Layout` is the
//! wholesale document exchanged with the persistence collaborator; it is read
//! and rewritten in one piece, never patched.
//!
//! Field names on the wire are camelCase to stay compatible with layouts
//! written by the browser editor. Keys this crate does not model (colours,
//! stroke widths, draggable flags) are kept in `Block::props` so a load/save
//! cycle never drops them.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::geom::{Point, Rect};

/// Unique identifier for a block.
pub type BlockId = String;

/// Generate a fresh block identifier.
#[must_use]
pub fn new_block_id() -> BlockId {
    Uuid::new_v4().to_string()
}

/// The kind of a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Assignable seat. Legacy documents without a `type` are seats.
    #[default]
    Slot,
    /// Occupant marker placed on top of a seat.
    Employee,
}

impl BlockKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slot => "slot",
            Self::Employee => "employee",
        }
    }

    /// Prefix used when auto-numbering labels.
    #[must_use]
    pub fn label_prefix(self) -> &'static str {
        match self {
            Self::Slot => "Seat",
            Self::Employee => "Employee",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block as stored in the layout and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    /// Left edge of the bounding box.
    pub x: f64,
    /// Top edge of the bounding box.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    /// Presentation keys owned by other editors, passed through untouched.
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl Block {
    /// Bounding box of the block.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Centre of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

/// A persisted layout: the full block list of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "seats")]
    pub blocks: Vec<Block>,
    /// RFC 3339 timestamp stamped by the persistence collaborator on first insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// RFC 3339 timestamp stamped by the persistence collaborator on every write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Layout {
    /// A layout that has not been written yet (no timestamps).
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self { id: id.into(), name: name.into(), blocks, created_at: None, updated_at: None }
    }

    /// Number of blocks of `kind`.
    #[must_use]
    pub fn count_of(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind == kind).count()
    }
}
