//! Shared constants for the layout crate.

// ── Grid ────────────────────────────────────────────────────────

/// Default snapping unit in world coordinates.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Side length of a seat slot, in grid cells.
pub const SLOT_CELLS: f64 = 5.0;

/// Side length of an employee marker, in grid cells.
pub const EMPLOYEE_CELLS: f64 = 3.0;

// ── Stage ───────────────────────────────────────────────────────

/// Horizontal space reserved around the stage when sizing it from the window.
pub const STAGE_MARGIN_X: f64 = 40.0;

/// Vertical space reserved for the toolbar and header above the stage.
pub const STAGE_MARGIN_Y: f64 = 120.0;

// ── Persistence ─────────────────────────────────────────────────

/// Identifier of the single layout edited by the default session.
pub const LAYOUT_ID: &str = "layout";

/// Name given to the default layout when it is first saved.
pub const DEFAULT_LAYOUT_NAME: &str = "Default layout";
