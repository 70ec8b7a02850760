//! Game module - drives the core shell from Bevy
//!
//! The shell owns every rule. Bevy samples input each frame, ticks the
//! shell on the fixed schedule and mirrors the resulting state.

use bevy::input::InputSystem;
use bevy::prelude::*;

use crucifixed::game::events::GameEventData;
use crucifixed::{GameConfig, GameShell};

use crate::ui::{rect_to_world, to_color};
use crate::AppState;

pub mod input;
pub mod visuals;

pub use input::*;
pub use visuals::*;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin {
    config: GameConfig,
}

impl GamePlugin {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .insert_resource(ShellRes(GameShell::from_config(self.config.clone())))
            .init_resource::<PendingInput>()

            // Events
            .add_event::<HitEvent>()

            // Input is sampled every frame and consumed by the fixed tick
            .add_systems(PreUpdate, collect_input.after(InputSystem))
            .add_systems(FixedUpdate, advance_shell)

            // Visual updates (variable timestep)
            .add_systems(Update, (
                spawn_hit_particles,
                update_hit_particles,
            ).chain().run_if(not(in_state(AppState::MainMenu))))
            .add_systems(OnEnter(AppState::MainMenu), clear_hit_particles);
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// The game itself
#[derive(Resource)]
pub struct ShellRes(pub GameShell);

// ============================================================================
// EVENTS
// ============================================================================

/// A landed blow, in world space
#[derive(Event)]
pub struct HitEvent {
    pub position: Vec2,
    pub killed: bool,
    pub color: Color,
}

// ============================================================================
// FIXED TICK
// ============================================================================

fn advance_shell(
    mut shell: ResMut<ShellRes>,
    mut pending: ResMut<PendingInput>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut hits: EventWriter<HitEvent>,
    mut exit: EventWriter<AppExit>,
) {
    let result = shell.0.tick(&pending.0);
    // Presses count once; held keys carry over until the next sample
    pending.0.clear_edges();

    let config = shell.0.config();
    let pitch = config.attack_grid_pitch;
    let screen = (config.screen_width, config.screen_height);
    let color = to_color(shell.0.palette().enemy, 255);

    for event in &result.events {
        if let GameEventData::TargetHit { cell, killed, .. } = &event.data {
            hits.send(HitEvent {
                position: rect_to_world(cell.to_rect(pitch), screen).0,
                killed: *killed,
                color,
            });
        }
    }

    let target = AppState::from(result.state);
    if *state.get() != target {
        next_state.set(target);
    }

    if result.quit {
        info!("Quit selected, closing");
        exit.send(AppExit::Success);
    }
}
