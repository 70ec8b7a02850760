//! Keyboard and mouse to game actions.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crucifixed::{Action, InputFrame, Point};

/// Keys bound to each action. Space doubles as attack and confirm.
const BINDINGS: &[(Action, &[KeyCode])] = &[
    (Action::MoveUp, &[KeyCode::ArrowUp, KeyCode::KeyW]),
    (Action::MoveDown, &[KeyCode::ArrowDown, KeyCode::KeyS]),
    (Action::MoveLeft, &[KeyCode::ArrowLeft, KeyCode::KeyA]),
    (Action::MoveRight, &[KeyCode::ArrowRight, KeyCode::KeyD]),
    (Action::Attack, &[KeyCode::Space]),
    (Action::Interact, &[KeyCode::KeyE]),
    (Action::Pause, &[KeyCode::Escape]),
    (Action::Confirm, &[KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space]),
    (Action::Cancel, &[KeyCode::KeyQ]),
    (Action::UsePotion, &[KeyCode::KeyH]),
];

/// Input not yet consumed by a fixed tick
#[derive(Resource, Default)]
pub struct PendingInput(pub InputFrame);

/// Sample this frame's input and fold it into the pending frame
pub fn collect_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pending: ResMut<PendingInput>,
) {
    let mut sample = InputFrame::new();

    for (action, keys) in BINDINGS {
        sample.set_held(*action, keyboard.any_pressed(keys.iter().copied()));
        sample.set_pressed(*action, keyboard.any_just_pressed(keys.iter().copied()));
    }

    // Window coordinates are already top-left origin, y down
    sample.pointer = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
        .map(|pos| Point::new(pos.x as i32, pos.y as i32));
    sample.clicked = mouse.just_pressed(MouseButton::Left);

    pending.0.merge(&sample);
}
