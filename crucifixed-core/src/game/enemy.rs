//! Enemies
//!
//! Damageable targets placed by the level. They block movement while alive
//! and disappear when killed. They do not move or attack.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::colour::Palette;
use crate::core::rect::{Point, Rect};
use crate::game::combat::{ActorId, Damageable};
use crate::render::DrawCommand;

/// Health every enemy spawns with.
pub const ENEMY_HEALTH: u32 = 100;

/// Enemy size when a level does not give one.
pub const ENEMY_SIZE: (i32, i32) = (50, 50);

/// A level enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Identity used in hit reports
    pub id: ActorId,
    /// Free-form kind from the level file
    pub kind: String,
    /// Bounding box
    pub rect: Rect,
    /// Remaining health
    pub health: u32,
}

impl Enemy {
    /// Create an enemy at full health.
    pub fn new(id: ActorId, kind: impl Into<String>, rect: Rect) -> Self {
        Self {
            id,
            kind: kind.into(),
            rect,
            health: ENEMY_HEALTH,
        }
    }

    /// Check if the enemy is alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Blocking box while alive.
    #[inline]
    pub fn collider(&self) -> Option<Rect> {
        self.is_alive().then_some(self.rect)
    }

    /// Draw command, `None` once dead.
    pub fn draw(&self, palette: &Palette) -> Option<DrawCommand> {
        self.is_alive().then(|| DrawCommand::solid(self.rect, palette.enemy))
    }
}

impl Damageable for Enemy {
    fn actor_id(&self) -> ActorId {
        self.id
    }

    fn centre(&self) -> Point {
        self.rect.centre()
    }

    fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        debug!("{:?} ({}) took {} damage, {} left", self.id, self.kind, amount, self.health);
        self.is_alive()
    }

    fn is_targetable(&self) -> bool {
        self.is_alive()
    }
}
