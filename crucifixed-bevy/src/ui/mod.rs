//! UI module - draws the shell's frame with sprites and 2D text
//!
//! Each frame is rebuilt from scratch: last frame's entities are dropped
//! and one entity (or a handful, for outlines) is spawned per command,
//! stacked in painter's order along z.

use bevy::prelude::*;

use crucifixed::render::{DrawCommand, TextSize};
use crucifixed::{Point, Rect, Rgb};

use crate::assets::GameAssets;
use crate::game::ShellRes;

/// Depth step between consecutive commands
const Z_STEP: f32 = 0.01;

/// Depth of the first command; hit particles draw at 500
const Z_BASE: f32 = 0.0;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_frame);
    }
}

/// Marker for entities spawned from the current frame
#[derive(Component)]
struct FrameItem;

// ============================================================================
// COORDINATES
// ============================================================================

/// Core colour to Bevy colour
pub fn to_color(rgb: Rgb, alpha: u8) -> Color {
    Color::srgba_u8(rgb.0, rgb.1, rgb.2, alpha)
}

/// Screen point (top-left origin, y down) to world point (centred, y up)
pub fn point_to_world(point: Point, screen: (i32, i32)) -> Vec2 {
    Vec2::new(
        point.x as f32 - screen.0 as f32 / 2.0,
        screen.1 as f32 / 2.0 - point.y as f32,
    )
}

/// Screen rect to world centre and size
pub fn rect_to_world(rect: Rect, screen: (i32, i32)) -> (Vec2, Vec2) {
    let w = rect.width as f32;
    let h = rect.height as f32;
    let centre = Vec2::new(
        rect.x as f32 + w / 2.0 - screen.0 as f32 / 2.0,
        screen.1 as f32 / 2.0 - (rect.y as f32 + h / 2.0),
    );
    (centre, Vec2::new(w, h))
}

/// The four edges of an outline, drawn inside the box
fn outline_edges(rect: Rect, thickness: i32) -> [Rect; 4] {
    let t = thickness.max(1).min(rect.width).min(rect.height);
    [
        Rect::new(rect.x, rect.y, rect.width, t),
        Rect::new(rect.x, rect.bottom() - t, rect.width, t),
        Rect::new(rect.x, rect.y, t, rect.height),
        Rect::new(rect.right() - t, rect.y, t, rect.height),
    ]
}

fn outline_offset(size: TextSize) -> f32 {
    match size {
        TextSize::Title => 2.0,
        TextSize::Menu | TextSize::Small => 1.0,
    }
}

// ============================================================================
// DRAWING
// ============================================================================

fn draw_frame(
    mut commands: Commands,
    shell: Res<ShellRes>,
    assets: Res<GameAssets>,
    previous: Query<Entity, With<FrameItem>>,
) {
    for entity in previous.iter() {
        commands.entity(entity).despawn();
    }

    let config = shell.0.config();
    let screen = (config.screen_width, config.screen_height);
    let full_screen = Rect::new(0, 0, screen.0, screen.1);
    let frame = shell.0.draw();

    let mut z = Z_BASE;
    let mut next_z = || {
        z += Z_STEP;
        z
    };

    let spawn_box = |commands: &mut Commands, rect: Rect, color: Color, z: f32| {
        let (centre, size) = rect_to_world(rect, screen);
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(centre.extend(z)),
            FrameItem,
        ));
    };

    for command in frame.commands {
        match command {
            DrawCommand::Fill(colour) => {
                spawn_box(&mut commands, full_screen, to_color(colour, 255), next_z());
            }
            DrawCommand::Background { kind, fallback } => match assets.background(kind) {
                Some(image) => {
                    let (centre, size) = rect_to_world(full_screen, screen);
                    commands.spawn((
                        Sprite {
                            image,
                            custom_size: Some(size),
                            ..default()
                        },
                        Transform::from_translation(centre.extend(next_z())),
                        FrameItem,
                    ));
                }
                None => spawn_box(&mut commands, full_screen, to_color(fallback, 255), next_z()),
            },
            DrawCommand::Rect { rect, colour, alpha } => {
                spawn_box(&mut commands, rect, to_color(colour, alpha), next_z());
            }
            DrawCommand::Outline { rect, colour, thickness } => {
                let z = next_z();
                for edge in outline_edges(rect, thickness) {
                    spawn_box(&mut commands, edge, to_color(colour, 255), z);
                }
            }
            DrawCommand::Overlay { alpha } => {
                spawn_box(&mut commands, full_screen, to_color(Rgb::BLACK, alpha), next_z());
            }
            DrawCommand::Text { text, centre, size, colour, outline } => {
                let font = TextFont {
                    font: assets.font(),
                    font_size: size.pixels(screen.1),
                    ..default()
                };
                let position = point_to_world(centre, screen);

                if let Some(outline) = outline {
                    let z = next_z();
                    let o = outline_offset(size);
                    for (dx, dy) in [(-o, -o), (-o, o), (o, -o), (o, o)] {
                        commands.spawn((
                            Text2d::new(text.clone()),
                            font.clone(),
                            TextColor(to_color(outline, 255)),
                            Transform::from_translation((position + Vec2::new(dx, dy)).extend(z)),
                            FrameItem,
                        ));
                    }
                }

                commands.spawn((
                    Text2d::new(text),
                    font,
                    TextColor(to_color(colour, 255)),
                    Transform::from_translation(position.extend(next_z())),
                    FrameItem,
                ));
            }
        }
    }
}
