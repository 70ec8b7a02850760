//! Player
//!
//! The player's body, health, inventory and attack handler. Movement is
//! resolved against the solids the session passes in and then clamped to
//! the play area.

use tracing::{debug, info};

use crate::config::{GameConfig, MovementMode};
use crate::core::colour::Palette;
use crate::core::grid::{Direction, GridCell};
use crate::core::rect::{Point, Rect};
use crate::game::collision::move_and_collide;
use crate::game::combat::{ActorId, AttackDescriptor, AttackHandler, Damageable};
use crate::game::input::{Action, InputFrame};
use crate::game::item::{Item, ItemKind};
use crate::game::objects::{GameObject, Interaction};
use crate::game::weapon::Weapon;
use crate::render::DrawCommand;

/// The player character.
#[derive(Clone, Debug)]
pub struct Player {
    /// Bounding box
    pub rect: Rect,
    health: u32,
    max_health: u32,
    speed: i32,
    inventory: Vec<Item>,
    attack: AttackHandler,
    mode: MovementMode,
    gravity: f32,
    jump_speed: f32,
    velocity_y: f32,
    grounded: bool,
}

impl Player {
    /// Create a player with its top-left corner at `spawn`.
    pub fn new(spawn: Point, config: &GameConfig) -> Self {
        let rect = Rect::new(spawn.x, spawn.y, config.player.width, config.player.height)
            .clamp_within(&config.play_bounds());

        Self {
            rect,
            health: config.player.max_health,
            max_health: config.player.max_health,
            speed: config.player.speed,
            inventory: Vec::new(),
            attack: AttackHandler::new(ActorId::PLAYER, config.attack_grid_pitch),
            mode: config.movement_mode,
            gravity: config.gravity,
            jump_speed: config.jump_speed,
            velocity_y: 0.0,
            grounded: false,
        }
    }

    /// Centre of the body.
    #[inline]
    pub fn centre(&self) -> Point {
        self.rect.centre()
    }

    /// Current health.
    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Maximum health.
    #[inline]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Check if the player is alive.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Restore health, up to the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Standing on something (side-scroll only).
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Items picked up so far.
    #[inline]
    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// Attack state.
    #[inline]
    pub fn attack_handler(&self) -> &AttackHandler {
        &self.attack
    }

    /// Equipped weapon.
    #[inline]
    pub fn weapon(&self) -> &'static Weapon {
        self.attack.weapon()
    }

    /// Facing direction.
    #[inline]
    pub fn facing(&self) -> Direction {
        self.attack.facing()
    }

    /// Equip a weapon by registry key.
    pub fn equip(&mut self, key: &str) -> bool {
        self.attack.equip(key)
    }

    /// Count the attack cooldown down by one tick.
    #[inline]
    pub fn tick_cooldown(&mut self) {
        self.attack.update();
    }

    /// Apply one tick of movement input.
    pub fn apply_movement(&mut self, input: &InputFrame, solids: &[Rect], bounds: &Rect) {
        match self.mode {
            MovementMode::TopDown => self.move_top_down(input, solids, bounds),
            MovementMode::SideScroll => self.move_side_scroll(input, solids, bounds),
        }
    }

    fn move_top_down(&mut self, input: &InputFrame, solids: &[Rect], bounds: &Rect) {
        let mut dx = 0;
        let mut dy = 0;

        for (action, direction) in [
            (Action::MoveLeft, Direction::Left),
            (Action::MoveRight, Direction::Right),
            (Action::MoveUp, Direction::Up),
            (Action::MoveDown, Direction::Down),
        ] {
            if input.is_held(action) {
                let (ux, uy) = direction.delta();
                dx += ux * self.speed;
                dy += uy * self.speed;
                self.attack.set_facing(direction);
            }
        }

        if dx == 0 && dy == 0 {
            return;
        }

        let outcome = move_and_collide(self.rect, dx, dy, solids);
        self.rect = outcome.rect.clamp_within(bounds);
    }

    fn move_side_scroll(&mut self, input: &InputFrame, solids: &[Rect], bounds: &Rect) {
        let mut dx = 0;
        if input.is_held(Action::MoveLeft) {
            dx -= self.speed;
            self.attack.set_facing(Direction::Left);
        }
        if input.is_held(Action::MoveRight) {
            dx += self.speed;
            self.attack.set_facing(Direction::Right);
        }

        if input.is_pressed(Action::MoveUp) && self.grounded {
            self.velocity_y = -self.jump_speed;
            self.grounded = false;
        }
        self.velocity_y += self.gravity;

        let dy = self.velocity_y.round() as i32;
        let outcome = move_and_collide(self.rect, dx, dy, solids);
        let clamped = outcome.rect.clamp_within(bounds);

        let on_floor = clamped.bottom() >= bounds.bottom() && self.velocity_y >= 0.0;
        self.grounded = outcome.grounded || on_floor;
        if outcome.blocked_vertical || clamped.y != outcome.rect.y {
            self.velocity_y = 0.0;
        }
        self.rect = clamped;
    }

    /// Attack if the input asks for it and the cooldown allows.
    pub fn handle_attack(&mut self, input: &InputFrame) -> Option<AttackDescriptor> {
        let centre = self.centre();
        self.attack.handle_attack_input(input, centre)
    }

    /// Cells the equipped weapon would hit right now.
    pub fn attack_preview(&self) -> Vec<GridCell> {
        self.attack.preview(self.centre())
    }

    /// Check if an object is close enough to interact with.
    pub fn is_near(&self, rect: &Rect, range: i32) -> bool {
        let here = self.centre();
        let there = rect.centre();
        (here.x - there.x).abs() < range && (here.y - there.y).abs() < range
    }

    /// Interact with the first interactable object in range.
    ///
    /// Returns the object's index and what happened, or `None` if nothing
    /// is near.
    pub fn interact_with(
        &self,
        objects: &mut [GameObject],
        range: i32,
    ) -> Option<(usize, Interaction)> {
        let (index, object) = objects
            .iter_mut()
            .enumerate()
            .find(|(_, obj)| obj.is_interactable() && self.is_near(&obj.rect(), range))?;

        object.interact().map(|outcome| (index, outcome))
    }

    /// Put an item in the inventory. Weapon items for known weapons are
    /// equipped immediately; the equipped weapon is returned.
    pub fn pick_up(&mut self, item: Item) -> Option<&'static Weapon> {
        let equipped = match &item.kind {
            ItemKind::Weapon { weapon } => self.attack.equip_or_err(weapon).ok(),
            ItemKind::Potion { .. } | ItemKind::Treasure { .. } => None,
        };

        info!("Picked up {}", item.name);
        self.inventory.push(item);
        equipped
    }

    /// Drink the first potion in the inventory. Nothing is used at full
    /// health. Returns the potion and the health actually restored.
    pub fn drink_potion(&mut self) -> Option<(Item, u32)> {
        if self.health >= self.max_health {
            return None;
        }
        let index = self
            .inventory
            .iter()
            .position(|item| matches!(item.kind, ItemKind::Potion { .. }))?;
        let potion = self.inventory.remove(index);

        let before = self.health;
        if let ItemKind::Potion { heal } = potion.kind {
            self.heal(heal);
        }
        let healed = self.health - before;
        info!("Drank {}, restored {} health", potion.name, healed);
        Some((potion, healed))
    }

    /// Body draw command.
    pub fn draw(&self, palette: &Palette) -> DrawCommand {
        DrawCommand::solid(self.rect, palette.player.main)
    }
}

impl Damageable for Player {
    fn actor_id(&self) -> ActorId {
        ActorId::PLAYER
    }

    fn centre(&self) -> Point {
        self.rect.centre()
    }

    fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        debug!("Player took {} damage, {} left", amount, self.health);
        self.is_alive()
    }
}
