//! Game Logic Module
//!
//! All game rules. Deterministic: the same inputs from the same level always
//! produce the same session.
//!
//! ## Module Structure
//!
//! - `input`: Per-tick action snapshot
//! - `weapon`: Weapon registry and attack area geometry
//! - `combat`: Attack handler, cooldowns, hit resolution
//! - `collision`: Axis-separated box resolution
//! - `item`: Chest contents and inventory items
//! - `objects`: Walls, doors, chests, obstacles
//! - `enemy`: Damageable level enemies
//! - `player`: Player movement, health, inventory
//! - `level`: Level file format and loading
//! - `events`: Events emitted by ticks
//! - `session`: One playing session and its tick
//! - `shell`: Main menu / playing / paused / game over

pub mod input;
pub mod weapon;
pub mod combat;
pub mod collision;
pub mod item;
pub mod objects;
pub mod enemy;
pub mod player;
pub mod level;
pub mod events;
pub mod session;
pub mod shell;

// Re-export key types
pub use input::{Action, InputFrame};
pub use combat::{ActorId, AttackDescriptor, AttackHandler, Damageable, Hit};
pub use objects::{GameObject, Interaction};
pub use level::Level;
pub use events::{GameEvent, GameEventData};
pub use session::Session;
pub use shell::{GameShell, GameState, TickResult};
