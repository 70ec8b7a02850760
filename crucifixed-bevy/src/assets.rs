//! Fonts and background images.
//!
//! Every asset is optional. A missing file is logged once at startup and
//! the renderer falls back to Bevy's built-in font or a solid colour.

use std::collections::HashMap;
use std::path::PathBuf;

use bevy::prelude::*;

use crucifixed::render::BackgroundKind;

/// Asset folder, relative to the client crate.
pub const ASSET_DIR: &str = "../assets";

const PRIMARY_FONT: &str = "fonts/CormorantUnicase-Regular.ttf";

const BACKGROUNDS: [(BackgroundKind, &str); 2] = [
    (BackgroundKind::MainMenu, "images/menu_background.png"),
    (BackgroundKind::Game, "images/dead_forest.png"),
];

pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameAssets>()
            .add_systems(PreStartup, load_assets);
    }
}

/// Loaded handles; `None` / absent entries mean "use the fallback".
#[derive(Resource, Default)]
pub struct GameAssets {
    pub font: Option<Handle<Font>>,
    pub backgrounds: HashMap<BackgroundKind, Handle<Image>>,
}

impl GameAssets {
    /// Font to use for text, Bevy's default if none was loaded.
    pub fn font(&self) -> Handle<Font> {
        self.font.clone().unwrap_or_default()
    }

    pub fn background(&self, kind: BackgroundKind) -> Option<Handle<Image>> {
        self.backgrounds.get(&kind).cloned()
    }
}

/// Directory Bevy resolves asset paths against.
fn asset_root() -> PathBuf {
    let base = std::env::var_os("BEVY_ASSET_ROOT")
        .or_else(|| std::env::var_os("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(PathBuf::from))
        })
        .unwrap_or_default();
    base.join(ASSET_DIR)
}

fn load_assets(asset_server: Res<AssetServer>, mut assets: ResMut<GameAssets>) {
    let root = asset_root();

    if root.join(PRIMARY_FONT).exists() {
        assets.font = Some(asset_server.load(PRIMARY_FONT));
        info!("Custom font '{}' loaded", PRIMARY_FONT);
    } else {
        warn!("Font file '{}' not found, using default font", PRIMARY_FONT);
    }

    for (kind, path) in BACKGROUNDS {
        if root.join(path).exists() {
            assets.backgrounds.insert(kind, asset_server.load(path));
            info!("Background image '{}' loaded", path);
        } else {
            warn!("Background image '{}' not found, using solid colour", path);
        }
    }
}
