//! Assignment heuristic: seat a new employee on the nearest free slot.
//!
//! A slot is occupied when some employee block is centred exactly on it.
//! Slot centres come from grid-aligned coordinates and fixed extents, so the
//! exact comparison does not drift under normal editing.

#[cfg(test)]
#[path = "assign_test.rs"]
mod assign_test;

use crate::doc::{Block, BlockKind};
use crate::error::EditError;
use crate::geom::Point;

/// The free slot whose centre is closest to `click`, if any.
///
/// Ties keep the slot that appears first in `blocks`.
#[must_use]
pub fn find_nearest_free_slot(click: Point, blocks: &[Block]) -> Option<&Block> {
    let occupied: Vec<Point> = blocks
        .iter()
        .filter(|b| b.kind == BlockKind::Employee)
        .map(Block::center)
        .collect();

    let mut best: Option<(&Block, f64)> = None;
    for slot in blocks.iter().filter(|b| b.kind == BlockKind::Slot) {
        let center = slot.center();
        if occupied.contains(&center) {
            continue;
        }
        let dist = click.distance(center);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((slot, dist));
        }
    }
    best.map(|(slot, _)| slot)
}

/// Resolve where an employee placed near `click` should be centred.
///
/// # Errors
///
/// Returns `NoFreeSlot` when there are at least as many employees as slots,
/// and `NoSuitableSlot` when the counts allow a placement but every slot
/// centre is already taken.
pub fn place_employee_nearest(click: Point, blocks: &[Block]) -> Result<Point, EditError> {
    let slots = blocks.iter().filter(|b| b.kind == BlockKind::Slot).count();
    let employees = blocks.iter().filter(|b| b.kind == BlockKind::Employee).count();
    if employees >= slots {
        return Err(EditError::NoFreeSlot);
    }
    find_nearest_free_slot(click, blocks)
        .map(Block::center)
        .ok_or(EditError::NoSuitableSlot)
}
