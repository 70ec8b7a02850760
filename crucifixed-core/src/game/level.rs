//! Level Data
//!
//! Levels are JSON: a tile layer and a list of named spawn objects. All
//! coordinates in the file are map pixels (tiles in tile units) and are
//! multiplied by `scale` on load. A file that leaves out `tile_size` or
//! `scale` takes the value from [`GameConfig`].
//!
//! ```json
//! {
//!   "tile_size": 8,
//!   "scale": 3,
//!   "tiles": [[0, 20], [1, 20]],
//!   "objects": [
//!     { "name": "player", "x": 100, "y": 100 },
//!     { "name": "door", "x": 120, "y": 90 },
//!     { "name": "chest", "x": 60, "y": 140,
//!       "contents": [{ "name": "Sword", "kind": "weapon", "weapon": "sword" }] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::core::colour::Rgb;
use crate::core::rect::{Point, Rect};
use crate::error::GameError;
use crate::game::combat::ActorId;
use crate::game::enemy::{Enemy, ENEMY_SIZE};
use crate::game::item::Item;
use crate::game::objects::{GameObject, CHEST_SIZE};

/// Door size (screen pixels) when a level does not give one.
pub const DOOR_SIZE: (i32, i32) = (20, 50);

/// Obstacle size (screen pixels) when a level does not give one.
pub const OBSTACLE_SIZE: (i32, i32) = (50, 50);

/// A spawn entry as written in the level file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnObject {
    /// What to spawn
    pub name: String,
    /// Left edge, map pixels
    pub x: i32,
    /// Top edge, map pixels
    pub y: i32,
    /// Width, map pixels
    #[serde(default)]
    pub width: Option<i32>,
    /// Height, map pixels
    #[serde(default)]
    pub height: Option<i32>,
    /// Chest contents
    #[serde(default)]
    pub contents: Vec<Item>,
    /// Obstacle colour
    #[serde(default)]
    pub colour: Option<Rgb>,
    /// Enemy kind
    #[serde(default)]
    pub kind: Option<String>,
    /// Hidden objects still block and interact
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

/// A level file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    /// Tile edge in map pixels, config value if absent
    #[serde(default)]
    pub tile_size: Option<i32>,
    /// Map-to-screen scale factor, config value if absent
    #[serde(default)]
    pub scale: Option<i32>,
    /// Solid ground tiles, in tile coordinates
    #[serde(default)]
    pub tiles: Vec<(i32, i32)>,
    /// Spawn entries
    #[serde(default)]
    pub objects: Vec<SpawnObject>,
}

/// A loaded level in screen pixels, ready to start sessions from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// Solid tile boxes
    pub tiles: Vec<Rect>,
    /// Player spawn (top-left), if the level has one
    pub player_spawn: Option<Point>,
    /// Level objects in file order
    pub objects: Vec<GameObject>,
    /// Enemies in file order
    pub enemies: Vec<Enemy>,
}

impl Level {
    /// Build a level from parsed data.
    pub fn from_data(data: &LevelData, config: &GameConfig) -> Result<Self, GameError> {
        let tile_size = data.tile_size.unwrap_or(config.tile_size);
        let scale = data.scale.unwrap_or(config.scale);
        if tile_size <= 0 || scale <= 0 {
            return Err(GameError::InvalidLevel(format!(
                "tile_size and scale must be positive (got {tile_size} and {scale})"
            )));
        }

        let tile_px = tile_size * scale;
        let tiles = data
            .tiles
            .iter()
            .map(|&(tx, ty)| Rect::new(tx * tile_px, ty * tile_px, tile_px, tile_px))
            .collect();

        let mut level = Level {
            tiles,
            player_spawn: None,
            objects: Vec::new(),
            enemies: Vec::new(),
        };

        for spawn in &data.objects {
            let at = Point::new(spawn.x, spawn.y).scale(scale);
            let size = |default: (i32, i32)| {
                (
                    spawn.width.map_or(default.0, |w| w * scale),
                    spawn.height.map_or(default.1, |h| h * scale),
                )
            };

            let object = match spawn.name.as_str() {
                "player" => {
                    if level.player_spawn.is_some() {
                        warn!("Level has more than one player spawn; using the first");
                    } else {
                        level.player_spawn = Some(at);
                    }
                    None
                }
                "wall" => {
                    let (w, h) = size((tile_px, tile_px));
                    Some(GameObject::wall(Rect::new(at.x, at.y, w, h)))
                }
                "door" => {
                    let (w, h) = size(DOOR_SIZE);
                    Some(GameObject::door(Rect::new(at.x, at.y, w, h)))
                }
                "chest" => {
                    let (w, h) = size(CHEST_SIZE);
                    Some(GameObject::chest(
                        Rect::new(at.x, at.y, w, h),
                        spawn.contents.clone(),
                    ))
                }
                "obstacle" => {
                    let (w, h) = size(OBSTACLE_SIZE);
                    Some(GameObject::obstacle(Rect::new(at.x, at.y, w, h), spawn.colour))
                }
                "enemy" => {
                    let (w, h) = size(ENEMY_SIZE);
                    let id = ActorId::enemy(level.enemies.len());
                    let kind = spawn.kind.clone().unwrap_or_else(|| "basic".to_string());
                    level.enemies.push(Enemy::new(id, kind, Rect::new(at.x, at.y, w, h)));
                    None
                }
                other => {
                    warn!("Skipping unknown spawn object '{other}'");
                    None
                }
            };

            if let Some(object) = object {
                level.objects.push(object.with_visible(spawn.visible));
            }
        }

        Ok(level)
    }

    /// Parse a level from JSON.
    pub fn from_json(json: &str, config: &GameConfig) -> Result<Self, GameError> {
        let data: LevelData = serde_json::from_str(json)?;
        Self::from_data(&data, config)
    }

    /// Read a level file.
    pub fn load(path: impl AsRef<Path>, config: &GameConfig) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameError::LevelIo {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&json, config)?;
        info!(
            "Loaded level {} ({} tiles, {} objects, {} enemies)",
            path.display(),
            level.tiles.len(),
            level.objects.len(),
            level.enemies.len()
        );
        Ok(level)
    }

    /// Read the configured level, falling back to the built-in one.
    pub fn load_or_builtin(config: &GameConfig) -> Self {
        match Self::load(&config.level_path, config) {
            Ok(level) => level,
            Err(e) => {
                warn!("{e}; using built-in level");
                Self::builtin(config)
            }
        }
    }

    /// A small hand-made room that fits the play area.
    pub fn builtin(config: &GameConfig) -> Self {
        let bounds = config.play_bounds();
        let centre = bounds.centre();

        Level {
            tiles: Vec::new(),
            player_spawn: Some(Point::new(centre.x - config.player.width / 2, centre.y)),
            objects: vec![
                GameObject::wall(Rect::new(
                    bounds.left() + 200,
                    bounds.top() + 40,
                    config.scaled_tile_size(),
                    200,
                )),
                GameObject::door(Rect::new(centre.x + 150, centre.y - 25, DOOR_SIZE.0, DOOR_SIZE.1)),
                GameObject::chest(
                    Rect::new(bounds.left() + 60, bounds.bottom() - 80, CHEST_SIZE.0, CHEST_SIZE.1),
                    vec![Item::weapon("sword"), Item::potion("Red Potion", 25)],
                ),
                GameObject::obstacle(
                    Rect::new(centre.x - 200, centre.y + 60, OBSTACLE_SIZE.0, OBSTACLE_SIZE.1),
                    None,
                ),
            ],
            enemies: vec![Enemy::new(
                ActorId::enemy(0),
                "basic",
                Rect::new(bounds.right() - 150, centre.y - 25, ENEMY_SIZE.0, ENEMY_SIZE.1),
            )],
        }
    }

    /// Where the player starts: the level's spawn, else the screen centre.
    pub fn spawn_point(&self, config: &GameConfig) -> Point {
        self.player_spawn
            .unwrap_or_else(|| Point::new(config.screen_width / 2, config.screen_height / 2))
    }
}
