//! Seating layout domain for the seat planner.
//!
//! This crate owns everything the editor needs to reason about a floor plan
//! without touching I/O: the block and layout types that travel over the
//! wire, the grid/overlap geometry used when a block is dropped on the
//! canvas, the nearest-free-slot heuristic used to seat an employee, and the
//! edit session that gates every mutation behind edit mode. Persistence is
//! reached only through the [`repo::LayoutRepository`] trait, which the
//! server implements over a JSON file and the CLI implements over HTTP.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Edit session: blocks, edit mode, selection, save/load |
//! | [`doc`] | Wire types: [`doc::Block`], [`doc::BlockKind`], [`doc::Layout`] |
//! | [`placement`] | Grid snapping, bounding boxes, overlap tests |
//! | [`assign`] | Nearest free slot lookup for employee placement |
//! | [`geom`] | Points and axis-aligned rectangles |
//! | [`repo`] | Persistence collaborator trait and its error type |
//! | [`error`] | Rejection reasons for edit operations |
//! | [`consts`] | Grid, stage and sentinel constants |

pub mod assign;
pub mod consts;
pub mod doc;
pub mod error;
pub mod geom;
pub mod placement;
pub mod repo;
pub mod store;
