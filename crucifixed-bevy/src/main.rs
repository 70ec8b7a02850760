//! The Crucifixed - Bevy client
//!
//! A thin front end over `crucifixed`: reads the keyboard and mouse into
//! input frames, ticks the game shell at a fixed 60 Hz and draws the frame
//! it describes.

mod assets;
mod game;
mod ui;

use bevy::prelude::*;
use bevy::window::WindowMode;

use crucifixed::{GameConfig, GameState, GAME_NAME};

use assets::AssetsPlugin;
use game::GamePlugin;
use ui::UiPlugin;

/// Config file read at startup, relative to the working directory.
const CONFIG_PATH: &str = "crucifixed.json";

/// Bevy-side mirror of the shell state
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

impl From<GameState> for AppState {
    fn from(state: GameState) -> Self {
        match state {
            GameState::MainMenu => AppState::MainMenu,
            GameState::Playing => AppState::Playing,
            GameState::Paused => AppState::Paused,
            GameState::GameOver => AppState::GameOver,
        }
    }
}

fn main() {
    let config = GameConfig::load_or_default(CONFIG_PATH);

    App::new()
        // Bevy defaults with custom window
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: GAME_NAME.into(),
                        resolution: (config.screen_width as f32, config.screen_height as f32).into(),
                        resizable: false,
                        mode: WindowMode::Windowed,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: assets::ASSET_DIR.into(),
                    ..default()
                }),
        )
        .insert_resource(Time::<Fixed>::from_hz(config.tick_rate as f64))
        // Game state
        .init_state::<AppState>()
        // Our plugins
        .add_plugins((
            AssetsPlugin,
            GamePlugin::new(config),
            UiPlugin,
        ))
        // Startup
        .add_systems(Startup, setup_2d_camera)
        .run();
}

/// 2D camera, one world unit per screen pixel
fn setup_2d_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
    ));

    info!("{} initialized", GAME_NAME);
}
