//! Playing Session
//!
//! One run of a level, from Play (or restart) until the shell drops it.
//! Each tick runs in a fixed order:
//!
//! 1. Attack cooldown counts down
//! 2. Player movement against the current solids
//! 3. Attack input, hits on enemies
//! 4. Interaction with doors and chests
//! 5. Potion use
//! 6. Death check

use tracing::info;

use crate::config::GameConfig;
use crate::core::colour::Palette;
use crate::core::rect::{Point, Rect};
use crate::game::combat::resolve_hits;
use crate::game::enemy::Enemy;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{Action, InputFrame};
use crate::game::level::Level;
use crate::game::objects::{GameObject, Interaction};
use crate::game::player::Player;
use crate::render::{health_bar, BackgroundKind, DrawCommand, Frame, TextSize};

/// Opacity of the attack preview cells.
const PREVIEW_ALPHA: u8 = 96;

/// State of one playing session.
#[derive(Clone, Debug)]
pub struct Session {
    tick: u32,
    player: Player,
    tiles: Vec<Rect>,
    objects: Vec<GameObject>,
    enemies: Vec<Enemy>,
    bounds: Rect,
    interact_range: i32,
    attack_held: bool,
}

impl Session {
    /// Start a fresh session on a level.
    pub fn new(level: &Level, config: &GameConfig) -> Self {
        let player = Player::new(level.spawn_point(config), config);
        info!(
            "Session started: player at {:?}, {} objects, {} enemies",
            player.rect.top_left(),
            level.objects.len(),
            level.enemies.len()
        );

        Self {
            tick: 0,
            player,
            tiles: level.tiles.clone(),
            objects: level.objects.clone(),
            enemies: level.enemies.clone(),
            bounds: config.play_bounds(),
            interact_range: config.interact_range,
            attack_held: false,
        }
    }

    /// Ticks run so far.
    #[inline]
    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    /// The player.
    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably.
    #[inline]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Level objects.
    #[inline]
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Enemies, dead ones included.
    #[inline]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Check if the player has died.
    #[inline]
    pub fn is_over(&self) -> bool {
        !self.player.is_alive()
    }

    /// Every box that currently blocks movement.
    pub fn solids(&self) -> Vec<Rect> {
        self.tiles
            .iter()
            .copied()
            .chain(self.objects.iter().filter_map(GameObject::collider))
            .chain(self.enemies.iter().filter_map(Enemy::collider))
            .collect()
    }

    /// Run one tick.
    pub fn tick(&mut self, input: &InputFrame) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let tick = self.tick;

        self.player.tick_cooldown();

        let solids = self.solids();
        self.player.apply_movement(input, &solids, &self.bounds);

        self.attack_held = input.is_held(Action::Attack);
        if let Some(attack) = self.player.handle_attack(input) {
            events.push(GameEvent::attack_issued(
                tick,
                attack.attacker,
                attack.weapon.key,
                self.player.facing(),
                attack.cells.clone(),
            ));

            for hit in resolve_hits(&attack, &mut self.enemies) {
                if hit.killed {
                    info!("{:?} killed with {}", hit.target, attack.weapon.name);
                }
                events.push(GameEvent::target_hit(
                    tick,
                    attack.attacker,
                    hit.target,
                    hit.damage,
                    hit.cell,
                    hit.killed,
                ));
            }
        }

        if input.is_pressed(Action::Interact) {
            self.interact(tick, &mut events);
        }

        if input.is_pressed(Action::UsePotion) {
            if let Some((potion, healed)) = self.player.drink_potion() {
                events.push(GameEvent::potion_used(tick, &potion.name, healed));
            }
        }

        if !self.player.is_alive() {
            info!("Player died on tick {tick}");
            events.push(GameEvent::new(tick, GameEventData::PlayerDied));
        }

        self.tick += 1;
        events
    }

    fn interact(&mut self, tick: u32, events: &mut Vec<GameEvent>) {
        let Some((index, outcome)) = self.player.interact_with(&mut self.objects, self.interact_range)
        else {
            info!("Nothing to interact with nearby");
            events.push(GameEvent::new(tick, GameEventData::NothingToInteract));
            return;
        };

        match outcome {
            Interaction::DoorOpened => events.push(GameEvent::door_toggled(tick, index, true)),
            Interaction::DoorClosed => events.push(GameEvent::door_toggled(tick, index, false)),
            Interaction::ChestAlreadyOpen => {
                info!("Chest is already open");
                events.push(GameEvent::new(tick, GameEventData::ChestAlreadyOpen { object: index }));
            }
            Interaction::ChestOpened { items } => {
                info!("Opened chest, found {} items", items.len());
                events.push(GameEvent::chest_opened(tick, index, items.len()));

                for item in items {
                    let name = item.name.clone();
                    let equipped = self.player.pick_up(item);
                    events.push(GameEvent::item_collected(tick, &name));
                    if let Some(weapon) = equipped {
                        events.push(GameEvent::weapon_equipped(tick, weapon.key));
                    }
                }
            }
        }
    }

    /// Draw the playing field and HUD.
    pub fn draw(&self, palette: &Palette, frame: &mut Frame) {
        frame.push(DrawCommand::Background {
            kind: BackgroundKind::Game,
            fallback: palette.floor,
        });

        for tile in &self.tiles {
            frame.push(DrawCommand::solid(*tile, palette.tile));
        }
        for object in &self.objects {
            frame.push_opt(object.draw(palette));
        }
        for enemy in &self.enemies {
            frame.push_opt(enemy.draw(palette));
        }

        if self.attack_held {
            let pitch = self.player.attack_handler().pitch();
            for cell in self.player.attack_preview() {
                frame.push(DrawCommand::Rect {
                    rect: cell.to_rect(pitch),
                    colour: palette.attack_preview,
                    alpha: PREVIEW_ALPHA,
                });
            }
        }

        frame.push(self.player.draw(palette));

        health_bar(frame, self.player.health(), self.player.max_health(), &palette.healthbar);
        frame.push(DrawCommand::outlined_text(
            self.player.weapon().name,
            Point::new(120, 60),
            TextSize::Small,
            palette.menu.text,
            palette.menu.outline,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Direction;
    use crate::game::combat::{ActorId, Damageable};
    use crate::game::item::Item;

    fn empty_level(spawn: Point) -> Level {
        Level {
            tiles: Vec::new(),
            player_spawn: Some(spawn),
            objects: Vec::new(),
            enemies: Vec::new(),
        }
    }

    #[test]
    fn test_solids_skip_open_doors_and_dead_enemies() {
        let config = GameConfig::default();
        let mut level = empty_level(Point::new(400, 400));
        level.tiles.push(Rect::new(0, 0, 24, 24));
        level.objects.push(GameObject::door(Rect::new(300, 300, 20, 50)));
        level.enemies.push(Enemy::new(ActorId(1), "basic", Rect::new(600, 300, 50, 50)));

        let mut session = Session::new(&level, &config);
        assert_eq!(session.solids().len(), 3);

        session.objects[0].interact();
        session.enemies[0].take_damage(500);
        assert_eq!(session.solids(), vec![Rect::new(0, 0, 24, 24)]);
    }

    #[test]
    fn test_sword_hits_enemy_in_front() {
        let config = GameConfig::default();
        // Player centre lands in grid cell (8, 8)
        let mut level = empty_level(Point::new(400, 400));
        level.enemies.push(Enemy::new(ActorId(1), "basic", Rect::new(455, 405, 40, 40)));

        let mut session = Session::new(&level, &config);
        assert!(session.player.equip("sword"));

        let mut input = InputFrame::holding(&[Action::Attack]);
        input.set_held(Action::MoveRight, true);
        let events = session.tick(&input);

        let hits: Vec<_> = events.iter().filter(|e| e.is_hit()).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(session.enemies()[0].health, 80);
        assert_eq!(session.player().facing(), Direction::Right);

        // Still cooling down next tick
        let events = session.tick(&input);
        assert!(events.iter().all(|e| !e.is_hit()));
    }

    #[test]
    fn test_chest_loot_is_collected_and_equipped() {
        let config = GameConfig::default();
        let mut level = empty_level(Point::new(400, 400));
        level.objects.push(GameObject::chest(
            Rect::new(460, 410, 40, 30),
            vec![Item::weapon("bow"), Item::treasure("Gold", 10)],
        ));
        let mut session = Session::new(&level, &config);

        let events = session.tick(&InputFrame::pressing(Action::Interact));
        let kinds: Vec<_> = events.iter().map(|e| &e.data).collect();
        assert!(matches!(kinds[0], GameEventData::ChestOpened { object: 0, item_count: 2 }));
        assert!(kinds.contains(&&GameEventData::WeaponEquipped { weapon: "bow".into() }));
        assert_eq!(session.player().weapon().key, "bow");
        assert_eq!(session.player().inventory().len(), 2);

        let events = session.tick(&InputFrame::pressing(Action::Interact));
        assert_eq!(events[0].data, GameEventData::ChestAlreadyOpen { object: 0 });
    }

    #[test]
    fn test_potion_heals_and_is_used_up() {
        let config = GameConfig::default();
        let mut level = empty_level(Point::new(400, 400));
        level.objects.push(GameObject::chest(
            Rect::new(460, 410, 40, 30),
            vec![Item::potion("Red Potion", 25)],
        ));
        let mut session = Session::new(&level, &config);
        session.tick(&InputFrame::pressing(Action::Interact));

        // Full health: kept for later
        assert!(session.tick(&InputFrame::pressing(Action::UsePotion)).is_empty());
        assert_eq!(session.player().inventory().len(), 1);

        session.player_mut().take_damage(10);
        let events = session.tick(&InputFrame::pressing(Action::UsePotion));
        assert_eq!(
            events[0].data,
            GameEventData::PotionUsed { name: "Red Potion".into(), healed: 10 }
        );
        assert_eq!(session.player().health(), 100);
        assert!(session.player().inventory().is_empty());

        session.player_mut().take_damage(10);
        assert!(session.tick(&InputFrame::pressing(Action::UsePotion)).is_empty());
        assert_eq!(session.player().health(), 90);
    }

    #[test]
    fn test_nothing_to_interact() {
        let config = GameConfig::default();
        let mut session = Session::new(&empty_level(Point::new(400, 400)), &config);
        let events = session.tick(&InputFrame::pressing(Action::Interact));
        assert_eq!(events[0].data, GameEventData::NothingToInteract);
        assert_eq!(session.tick_count(), 1);
    }

    #[test]
    fn test_draw_starts_with_game_background() {
        let palette = Palette::DEFAULT;
        let session = Session::new(&empty_level(Point::new(400, 400)), &GameConfig::default());
        let mut frame = Frame::new();
        session.draw(&palette, &mut frame);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Background {
                kind: BackgroundKind::Game,
                fallback: palette.floor,
            }
        );
    }

    #[test]
    fn test_hidden_objects_are_not_drawn() {
        let palette = Palette::DEFAULT;
        let mut level = empty_level(Point::new(400, 400));
        let hidden = Rect::new(100, 300, 24, 24);
        level.objects.push(GameObject::wall(hidden).with_visible(false));
        let session = Session::new(&level, &GameConfig::default());

        let mut frame = Frame::new();
        session.draw(&palette, &mut frame);
        assert!(!frame
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { rect, .. } if *rect == hidden)));
        assert!(session.solids().contains(&hidden));
    }

    #[test]
    fn test_preview_drawn_only_while_attack_held() {
        let config = GameConfig::default();
        let palette = Palette::DEFAULT;
        let mut session = Session::new(&empty_level(Point::new(400, 400)), &config);

        let count_previews = |s: &Session| {
            let mut frame = Frame::new();
            s.draw(&palette, &mut frame);
            frame
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Rect { alpha, .. } if *alpha == PREVIEW_ALPHA))
                .count()
        };

        session.tick(&InputFrame::new());
        assert_eq!(count_previews(&session), 0);

        session.tick(&InputFrame::holding(&[Action::Attack]));
        assert_eq!(count_previews(&session), 1);
    }
}
