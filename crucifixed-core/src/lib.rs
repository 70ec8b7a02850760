//! # The Crucifixed
//!
//! Game rules for a top-down 2D action-adventure prototype.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      THE CRUCIFIXED                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Geometry primitives                      │
//! │  ├── rect.rs      - Pixel-space points and boxes             │
//! │  ├── grid.rs      - Grid cells and facing directions         │
//! │  └── colour.rs    - Constant colour palette                  │
//! │                                                              │
//! │  game/            - Game logic (deterministic)               │
//! │  ├── input.rs     - Per-tick action snapshot                 │
//! │  ├── weapon.rs    - Weapon registry and attack areas         │
//! │  ├── combat.rs    - Attack handler and hit resolution        │
//! │  ├── collision.rs - Axis-separated box resolution            │
//! │  ├── item.rs      - Chest contents and inventory items       │
//! │  ├── objects.rs   - Walls, doors, chests, obstacles          │
//! │  ├── enemy.rs     - Damageable level enemies                 │
//! │  ├── player.rs    - Player movement, health, inventory       │
//! │  ├── level.rs     - Level data and loading                   │
//! │  ├── events.rs    - Events emitted by ticks                  │
//! │  ├── session.rs   - One playing session and its tick         │
//! │  └── shell.rs     - Menu / playing / paused / game over      │
//! │                                                              │
//! │  render.rs        - Backend-neutral draw commands            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate touches a window, a clock or a file handle during
//! a tick. A front end feeds [`InputFrame`]s into a [`GameShell`] at
//! [`TICK_RATE`] and draws the [`render::Frame`] it returns.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod render;

// Re-export commonly used types
pub use config::GameConfig;
pub use core::colour::{Palette, Rgb};
pub use core::grid::{Direction, GridCell};
pub use core::rect::{Point, Rect};
pub use error::GameError;
pub use game::input::{Action, InputFrame};
pub use game::shell::{GameShell, GameState, TickResult};
pub use game::weapon::{Weapon, WEAPONS};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Window title and menu heading.
pub const GAME_NAME: &str = "The Crucifixed";

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
