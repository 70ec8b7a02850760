//! Game configuration.
//!
//! One `GameConfig` is built at startup and handed by reference to the
//! shell and every session it creates. Missing fields in a config file
//! take their default values; values the game cannot run with (a zero tick
//! rate, a non-positive grid pitch or size) reject the whole file.

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::core::rect::Rect;
use crate::error::GameError;

/// How the player moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Four-directional movement, no gravity.
    #[default]
    TopDown,
    /// Horizontal movement with gravity; move-up jumps while grounded.
    SideScroll,
}

/// Margins between the screen edge and the player's reachable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfacePadding {
    /// Left margin
    pub left: i32,
    /// Right margin
    pub right: i32,
    /// Top margin
    pub top: i32,
    /// Bottom margin
    pub bottom: i32,
}

impl Default for SurfacePadding {
    fn default() -> Self {
        Self {
            left: 40,
            right: 40,
            top: 250,
            bottom: 40,
        }
    }
}

/// Player attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Body width
    pub width: i32,
    /// Body height
    pub height: i32,
    /// Pixels moved per tick
    pub speed: i32,
    /// Starting and maximum health
    pub max_health: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            speed: 5,
            max_health: 100,
        }
    }
}

/// Configuration for the whole game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width in pixels
    pub screen_width: i32,
    /// Screen height in pixels
    pub screen_height: i32,
    /// Ticks per second
    pub tick_rate: u32,
    /// Source tile size in map pixels
    pub tile_size: i32,
    /// Map-to-screen scale factor
    pub scale: i32,
    /// Pixel size of one combat grid cell
    pub attack_grid_pitch: i32,
    /// Player reachable-area margins
    pub surface_padding: SurfacePadding,
    /// Player attributes
    pub player: PlayerConfig,
    /// Max centre-to-centre distance (per axis) for interacting
    pub interact_range: i32,
    /// Movement style
    pub movement_mode: MovementMode,
    /// Downward acceleration per tick (side-scroll only)
    pub gravity: f32,
    /// Upward speed applied on jump (side-scroll only)
    pub jump_speed: f32,
    /// Level file to load
    pub level_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            tick_rate: crate::TICK_RATE,
            tile_size: 8,
            scale: 3,
            attack_grid_pitch: 50,
            surface_padding: SurfacePadding::default(),
            player: PlayerConfig::default(),
            interact_range: 80,
            movement_mode: MovementMode::TopDown,
            gravity: 0.9,
            jump_speed: 7.2,
            level_path: PathBuf::from("assets/levels/level1.json"),
        }
    }
}

impl GameConfig {
    /// Tile edge length on screen.
    #[inline]
    pub fn scaled_tile_size(&self) -> i32 {
        self.tile_size * self.scale
    }

    /// Area the player is allowed to occupy.
    pub fn play_bounds(&self) -> Rect {
        let pad = &self.surface_padding;
        Rect::new(
            pad.left,
            pad.top,
            self.screen_width - pad.left - pad.right,
            self.screen_height - pad.top - pad.bottom,
        )
    }

    /// First setting that makes this config unusable, if any.
    pub fn problem(&self) -> Option<String> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("tile_size", self.tile_size),
            ("scale", self.scale),
            ("attack_grid_pitch", self.attack_grid_pitch),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("interact_range", self.interact_range),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0) {
            return Some(format!("{name} must be positive (got {value})"));
        }
        if self.tick_rate == 0 {
            return Some("tick_rate must be positive".to_string());
        }
        if self.player.speed < 0 {
            return Some(format!("player.speed must not be negative (got {})", self.player.speed));
        }
        if self.player.max_health == 0 {
            return Some("player.max_health must be positive".to_string());
        }

        let bounds = self.play_bounds();
        if bounds.width < self.player.width || bounds.height < self.player.height {
            return Some(format!(
                "surface_padding leaves {}x{} px, too small for the player",
                bounds.width, bounds.height
            ));
        }
        None
    }

    /// Parse and check a config from JSON.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        match config.problem() {
            Some(reason) => Err(GameError::InvalidConfig {
                path: path.to_path_buf(),
                reason,
            }),
            None => Ok(config),
        }
    }

    /// Read a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    /// Read a config file, falling back to defaults if it is missing or broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}
