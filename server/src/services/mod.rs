//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence concerns so route handlers can stay
//! focused on protocol translation.

pub mod room;
