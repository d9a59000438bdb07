//! Tables and drag-and-drop.
//!
//! ## Key Types
//!
//! - `Table`: owns a tabletop, resolves paths and points to components
//! - `DragContext`: one drag gesture, from pick-up to drop or cancel

pub mod drag;
pub mod table;

pub use drag::{DragContext, DragState};
pub use table::Table;
