//! Geometry and colour primitives.
//!
//! Everything here is plain integer data with no knowledge of the game
//! rules built on top of it.

pub mod colour;
pub mod grid;
pub mod rect;

// Re-export core types
pub use colour::{Palette, Rgb};
pub use grid::{Direction, GridCell};
pub use rect::{Point, Rect};
