//! Board engine: grid storage, group discovery, placement and rendering.
//!
//! ## Key Types
//!
//! - `Grid`: flat cell storage
//! - `Group` / `Groups`: connected regions of one board state
//! - `Board`: placement, capture, passing and the attached negotiation state

pub mod grid;
pub mod group;
pub mod engine;
pub mod render;

pub use grid::Grid;
pub use group::{Group, GroupId, Groups};
pub use engine::{Board, PASSES_TO_END};
pub use render::render_grid;
