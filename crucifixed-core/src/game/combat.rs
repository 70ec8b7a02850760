//! Attack Handling
//!
//! Each actor owns an [`AttackHandler`]: equipped weapon, facing and a
//! cooldown counter. The handler is `ready` when the counter is zero and
//! `cooling down` otherwise; a successful attack resets the counter to the
//! weapon's cooldown and [`AttackHandler::update`] counts it back down once
//! per tick.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::grid::{Direction, GridCell};
use crate::core::rect::{Point, Rect};
use crate::error::GameError;
use crate::game::input::{Action, InputFrame};
use crate::game::weapon::{default_weapon, find_weapon, Weapon};

/// Identifies an actor without borrowing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    /// The local player
    pub const PLAYER: ActorId = ActorId(0);

    /// Id for the n-th enemy of a level.
    #[inline]
    pub const fn enemy(index: usize) -> ActorId {
        ActorId(index as u32 + 1)
    }
}

/// One resolved attack, consumed immediately by hit-testing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackDescriptor {
    /// Who attacked
    pub attacker: ActorId,
    /// Weapon used
    pub weapon: &'static Weapon,
    /// Damage per target hit
    pub damage: u32,
    /// Affected cells, in weapon order
    pub cells: Vec<GridCell>,
    /// Grid pitch the cells were computed with
    pub pitch: i32,
}

impl AttackDescriptor {
    /// Check if a cell is inside the attack area.
    #[inline]
    pub fn covers(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Pixel boxes of the affected cells, for effects and previews.
    pub fn pixel_cells(&self) -> impl Iterator<Item = Rect> + '_ {
        self.cells.iter().map(move |cell| cell.to_rect(self.pitch))
    }
}

/// Something that can be hit by an attack.
pub trait Damageable {
    /// Identity reported in hits.
    fn actor_id(&self) -> ActorId;

    /// Pixel-space centre, used to find the occupied grid cell.
    fn centre(&self) -> Point;

    /// Apply damage. Returns whether the target is still alive.
    fn take_damage(&mut self, amount: u32) -> bool;

    /// Whether hits should still consider this target.
    fn is_targetable(&self) -> bool {
        true
    }
}

/// A target struck by an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Index into the candidate slice
    pub index: usize,
    /// Target identity
    pub target: ActorId,
    /// Damage applied
    pub damage: u32,
    /// Cell the target occupied
    pub cell: GridCell,
    /// Target died from this hit
    pub killed: bool,
}

/// Apply an attack to every candidate standing in its area.
///
/// Each target in a covered cell takes the full damage, including several
/// targets sharing one cell.
pub fn resolve_hits<T: Damageable>(descriptor: &AttackDescriptor, targets: &mut [T]) -> Vec<Hit> {
    let mut hits = Vec::new();

    for (index, target) in targets.iter_mut().enumerate() {
        if !target.is_targetable() {
            continue;
        }

        let cell = GridCell::from_pixel(target.centre(), descriptor.pitch);
        if !descriptor.covers(cell) {
            continue;
        }

        let alive = target.take_damage(descriptor.damage);
        hits.push(Hit {
            index,
            target: target.actor_id(),
            damage: descriptor.damage,
            cell,
            killed: !alive,
        });
    }

    hits
}

/// Per-actor attack state.
#[derive(Clone, Debug)]
pub struct AttackHandler {
    owner: ActorId,
    weapon: &'static Weapon,
    cooldown: u32,
    facing: Direction,
    pitch: i32,
}

impl AttackHandler {
    /// Create a ready handler holding the default weapon, facing down.
    pub fn new(owner: ActorId, pitch: i32) -> Self {
        Self {
            owner,
            weapon: default_weapon(),
            cooldown: 0,
            facing: Direction::default(),
            pitch,
        }
    }

    /// Count the cooldown down by one tick, stopping at zero.
    #[inline]
    pub fn update(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Check if an attack can be issued now.
    #[inline]
    pub fn can_attack(&self) -> bool {
        self.cooldown == 0
    }

    /// Remaining cooldown ticks.
    #[inline]
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Equipped weapon.
    #[inline]
    pub fn weapon(&self) -> &'static Weapon {
        self.weapon
    }

    /// Current facing.
    #[inline]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Change facing without attacking.
    #[inline]
    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    /// Grid pitch in pixels.
    #[inline]
    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    /// Equip a weapon by registry key. Unknown keys leave the handler as is.
    pub fn equip(&mut self, key: &str) -> bool {
        self.equip_or_err(key).is_ok()
    }

    /// Equip a weapon by registry key, reporting unknown keys.
    pub fn equip_or_err(&mut self, key: &str) -> Result<&'static Weapon, GameError> {
        let weapon = find_weapon(key).ok_or_else(|| GameError::UnknownWeapon(key.to_string()))?;
        self.weapon = weapon;
        debug!("{:?} equipped {}", self.owner, weapon.name);
        Ok(weapon)
    }

    /// Issue an attack from the owner's pixel centre.
    ///
    /// Returns `None` without touching any state while cooling down.
    /// Otherwise a requested direction becomes the new facing before the
    /// area is computed.
    pub fn try_attack(
        &mut self,
        owner_centre: Point,
        requested: Option<Direction>,
    ) -> Option<AttackDescriptor> {
        if !self.can_attack() {
            return None;
        }

        if let Some(direction) = requested {
            self.facing = direction;
        }

        let origin = GridCell::from_pixel(owner_centre, self.pitch);
        let cells = self.weapon.attack_area(origin, self.facing);
        self.cooldown = self.weapon.cooldown;

        debug!(
            "{:?} attacks with {} facing {:?} from {:?} ({} cells)",
            self.owner,
            self.weapon.name,
            self.facing,
            origin,
            cells.len()
        );

        Some(AttackDescriptor {
            attacker: self.owner,
            weapon: self.weapon,
            damage: self.weapon.damage,
            cells,
            pitch: self.pitch,
        })
    }

    /// Direction an attack should go this tick, if the input asks for one.
    ///
    /// With attack held, the first held movement key (up, down, left,
    /// right) wins, else the current facing. Without it, a pointer click
    /// aims along the dominant axis from the owner to the pointer.
    pub fn attack_direction(&self, input: &InputFrame, owner_centre: Point) -> Option<Direction> {
        if input.is_held(Action::Attack) {
            let aimed = [
                (Action::MoveUp, Direction::Up),
                (Action::MoveDown, Direction::Down),
                (Action::MoveLeft, Direction::Left),
                (Action::MoveRight, Direction::Right),
            ]
            .into_iter()
            .find(|(action, _)| input.is_held(*action))
            .map(|(_, direction)| direction);

            return Some(aimed.unwrap_or(self.facing));
        }

        if input.clicked {
            let pointer = input.pointer?;
            return Some(Direction::dominant(
                pointer.x - owner_centre.x,
                pointer.y - owner_centre.y,
            ));
        }

        None
    }

    /// Read attack input and attack if it asks for one.
    pub fn handle_attack_input(
        &mut self,
        input: &InputFrame,
        owner_centre: Point,
    ) -> Option<AttackDescriptor> {
        let direction = self.attack_direction(input, owner_centre)?;
        self.try_attack(owner_centre, Some(direction))
    }

    /// Cells the equipped weapon would hit right now, ignoring cooldown.
    pub fn preview(&self, owner_centre: Point) -> Vec<GridCell> {
        let origin = GridCell::from_pixel(owner_centre, self.pitch);
        self.weapon.attack_area(origin, self.facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PITCH: i32 = 50;

    /// Pixel centre of a grid cell.
    fn centre_of(x: i32, y: i32) -> Point {
        Point::new(x * PITCH + PITCH / 2, y * PITCH + PITCH / 2)
    }

    struct Dummy {
        id: ActorId,
        at: Point,
        health: u32,
    }

    impl Dummy {
        fn at_cell(id: u32, x: i32, y: i32) -> Self {
            Self {
                id: ActorId(id),
                at: centre_of(x, y),
                health: 100,
            }
        }
    }

    impl Damageable for Dummy {
        fn actor_id(&self) -> ActorId {
            self.id
        }

        fn centre(&self) -> Point {
            self.at
        }

        fn take_damage(&mut self, amount: u32) -> bool {
            self.health = self.health.saturating_sub(amount);
            self.health > 0
        }

        fn is_targetable(&self) -> bool {
            self.health > 0
        }
    }

    #[test]
    fn test_new_handler_defaults() {
        let handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        assert!(handler.can_attack());
        assert_eq!(handler.weapon().key, "fists");
        assert_eq!(handler.facing(), Direction::Down);
    }

    #[test]
    fn test_equip_unknown_keeps_weapon() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        assert!(handler.equip("bow"));
        assert!(!handler.equip("laser"));
        assert_eq!(handler.weapon().key, "bow");

        let err = handler.equip_or_err("laser").unwrap_err();
        assert!(matches!(err, GameError::UnknownWeapon(ref k) if k == "laser"));
    }

    #[test]
    fn test_attack_sets_cooldown_and_blocks_second() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        handler.equip("sword");

        let first = handler.try_attack(centre_of(4, 4), Some(Direction::Right));
        assert!(first.is_some());
        assert_eq!(handler.cooldown(), 25);

        handler.update();
        let second = handler.try_attack(centre_of(4, 4), Some(Direction::Up));
        assert!(second.is_none());
        assert_eq!(handler.cooldown(), 24);
        // Rejected attack leaves facing alone
        assert_eq!(handler.facing(), Direction::Right);
    }

    #[test]
    fn test_ready_again_after_cooldown() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        handler.try_attack(centre_of(0, 0), None).unwrap();
        for _ in 0..15 {
            assert!(!handler.can_attack());
            handler.update();
        }
        assert!(handler.can_attack());
    }

    #[test]
    fn test_attack_without_direction_uses_facing() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        let attack = handler.try_attack(centre_of(2, 2), None).unwrap();
        assert_eq!(attack.cells, vec![GridCell::new(2, 3)]);
        assert_eq!(attack.attacker, ActorId::PLAYER);
        assert_eq!(attack.damage, 5);
    }

    #[test]
    fn test_sword_hits_target_in_front() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        handler.equip("sword");

        let mut targets = vec![
            Dummy::at_cell(1, 5, 4),
            Dummy::at_cell(2, 4, 3),
            Dummy::at_cell(3, 4, 5),
        ];

        let attack = handler.try_attack(centre_of(4, 4), Some(Direction::Right)).unwrap();
        let hits = resolve_hits(&attack, &mut targets);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, ActorId(1));
        assert_eq!(hits[0].damage, 20);
        assert_eq!(hits[0].cell, GridCell::new(5, 4));
        assert_eq!(targets[0].health, 80);
        // Range 1 cone has no side cells
        assert_eq!(targets[1].health, 100);
        assert_eq!(targets[2].health, 100);
    }

    #[test]
    fn test_shared_cell_each_take_full_damage() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        handler.equip("bow");

        let mut targets = vec![Dummy::at_cell(1, 3, 1), Dummy::at_cell(2, 3, 1)];
        let attack = handler.try_attack(centre_of(3, 3), Some(Direction::Up)).unwrap();
        let hits = resolve_hits(&attack, &mut targets);

        assert_eq!(hits.len(), 2);
        assert!(targets.iter().all(|t| t.health == 85));
    }

    #[test]
    fn test_dead_targets_skipped() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        handler.equip("magic_blast");

        let mut targets = vec![Dummy::at_cell(1, 1, 0)];
        targets[0].health = 30;

        let attack = handler.try_attack(centre_of(0, 0), None).unwrap();
        let hits = resolve_hits(&attack, &mut targets);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].killed);

        let again = resolve_hits(&attack, &mut targets);
        assert!(again.is_empty());
    }

    #[test]
    fn test_attack_direction_priority() {
        let handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        let centre = centre_of(5, 5);

        let idle = InputFrame::new();
        assert_eq!(handler.attack_direction(&idle, centre), None);

        let plain = InputFrame::holding(&[Action::Attack]);
        assert_eq!(handler.attack_direction(&plain, centre), Some(Direction::Down));

        let aimed = InputFrame::holding(&[Action::Attack, Action::MoveRight, Action::MoveUp]);
        assert_eq!(handler.attack_direction(&aimed, centre), Some(Direction::Up));

        let click = InputFrame::click_at(Point::new(centre.x - 200, centre.y + 20));
        assert_eq!(handler.attack_direction(&click, centre), Some(Direction::Left));
    }

    #[test]
    fn test_preview_matches_attack() {
        let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
        handler.equip("staff");
        handler.set_facing(Direction::Left);

        let preview = handler.preview(centre_of(6, 2));
        let attack = handler.try_attack(centre_of(6, 2), None).unwrap();
        assert_eq!(preview, attack.cells);
        assert_eq!(
            attack.pixel_cells().next(),
            Some(Rect::new(250, 100, PITCH, PITCH))
        );
    }

    proptest! {
        #[test]
        fn prop_cooldown_never_negative(cooldown_idx in 0usize..5, ticks in 0u32..200) {
            let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
            let key = crate::game::weapon::WEAPONS[cooldown_idx].key;
            handler.equip(key);
            handler.try_attack(Point::ZERO, None).unwrap();
            let start = handler.cooldown();

            for _ in 0..ticks {
                handler.update();
            }

            prop_assert_eq!(handler.cooldown(), start.saturating_sub(ticks));
        }

        #[test]
        fn prop_attack_during_cooldown_changes_nothing(elapsed in 0u32..24) {
            let mut handler = AttackHandler::new(ActorId::PLAYER, PITCH);
            handler.equip("sword");
            handler.try_attack(Point::ZERO, Some(Direction::Left)).unwrap();
            for _ in 0..elapsed {
                handler.update();
            }
            let before = handler.cooldown();

            prop_assert!(handler.try_attack(Point::ZERO, Some(Direction::Right)).is_none());
            prop_assert_eq!(handler.cooldown(), before);
            prop_assert_eq!(handler.facing(), Direction::Left);
        }
    }
}
