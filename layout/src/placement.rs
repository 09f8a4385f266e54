//! Placement engine: grid snapping, block sizing and overlap detection.
//!
//! Everything here is pure. A click on the canvas is treated as the centre of
//! the new block; the centre is snapped to the grid and the block's fixed
//! extent for its kind is laid out around it.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::consts::{EMPLOYEE_CELLS, SLOT_CELLS};
use crate::doc::{Block, BlockKind};
use crate::geom::{Point, Rect};

/// A proposed block position that has not been committed yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub kind: BlockKind,
    pub rect: Rect,
}

/// Round `value` to the nearest multiple of `grid_size`.
///
/// Halves round toward positive infinity so that `-10` snaps to `0` on a
/// 20-unit grid, matching the browser editor. A non-positive or non-finite
/// grid disables snapping.
#[must_use]
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return value;
    }
    (value / grid_size + 0.5).floor() * grid_size
}

/// Snap both coordinates of `point` independently.
#[must_use]
pub fn snap_point(point: Point, grid_size: f64) -> Point {
    Point::new(snap_to_grid(point.x, grid_size), snap_to_grid(point.y, grid_size))
}

/// Fixed `(width, height)` of a block of `kind`.
#[must_use]
pub fn bounding_box_for(kind: BlockKind, grid_size: f64) -> (f64, f64) {
    let cells = match kind {
        BlockKind::Slot => SLOT_CELLS,
        BlockKind::Employee => EMPLOYEE_CELLS,
    };
    (cells * grid_size, cells * grid_size)
}

/// Top-left corner of a `width` x `height` box whose centre is `click` snapped to the grid.
#[must_use]
pub fn compute_top_left(click: Point, width: f64, height: f64, grid_size: f64) -> Point {
    let center = snap_point(click, grid_size);
    Point::new(center.x - width / 2.0, center.y - height / 2.0)
}

/// Size and position a new block of `kind` for a click at `click`.
#[must_use]
pub fn candidate_at(click: Point, kind: BlockKind, grid_size: f64) -> Candidate {
    let (width, height) = bounding_box_for(kind, grid_size);
    let top_left = compute_top_left(click, width, height, grid_size);
    Candidate { kind, rect: Rect::new(top_left.x, top_left.y, width, height) }
}

/// Size a block of `kind` centred exactly on `center`, without snapping.
#[must_use]
pub fn candidate_centered(center: Point, kind: BlockKind, grid_size: f64) -> Candidate {
    let (width, height) = bounding_box_for(kind, grid_size);
    Candidate { kind, rect: Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height) }
}

/// Strict axis-aligned intersection. Boxes that only share an edge do not overlap.
#[must_use]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// Whether `candidate` collides with any existing block of the same kind.
#[must_use]
pub fn has_overlap_with_same_type(candidate: &Candidate, blocks: &[Block]) -> bool {
    blocks
        .iter()
        .filter(|b| b.kind == candidate.kind)
        .any(|b| overlaps(&candidate.rect, &b.rect()))
}
