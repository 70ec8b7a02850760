//! Headless runner for The Crucifixed.
//!
//! Plays a scripted session without a window, logs what happens and checks
//! that a second run with the same inputs ends in the same state.
//!
//! ```text
//! crucifixed-sim [CONFIG.json] [--dump-frame]
//! ```

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crucifixed::{
    config::GameConfig,
    game::{
        events::GameEventData,
        level::Level,
        shell::{GameShell, GameState},
    },
    Action, InputFrame, Rect, GAME_NAME, TICK_RATE, VERSION,
};

/// Default config file looked up next to the working directory.
const DEFAULT_CONFIG: &str = "crucifixed.json";

/// One step of the script: hold these actions for this many ticks, with
/// `press` freshly pressed on the first tick.
struct Step {
    ticks: u32,
    hold: &'static [Action],
    press: Option<Action>,
}

const SCRIPT: &[Step] = &[
    // Main menu: Play
    Step { ticks: 1, hold: &[], press: Some(Action::Confirm) },
    Step { ticks: 45, hold: &[Action::MoveLeft], press: None },
    Step { ticks: 30, hold: &[Action::MoveDown], press: None },
    Step { ticks: 1, hold: &[], press: Some(Action::Interact) },
    Step { ticks: 60, hold: &[Action::MoveRight], press: None },
    Step { ticks: 120, hold: &[Action::Attack, Action::MoveRight], press: None },
    Step { ticks: 1, hold: &[], press: Some(Action::Pause) },
    Step { ticks: 30, hold: &[], press: None },
    Step { ticks: 1, hold: &[], press: Some(Action::Pause) },
    Step { ticks: 90, hold: &[Action::MoveUp], press: None },
    Step { ticks: 1, hold: &[], press: Some(Action::Interact) },
    Step { ticks: 60, hold: &[Action::Attack], press: None },
];

/// Final state used to compare runs.
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    state: GameState,
    player: Option<Rect>,
    health: Option<u32>,
    enemy_health: Vec<u32>,
    events: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    let mut config_path = DEFAULT_CONFIG.to_string();
    let mut dump_frame = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dump-frame" => dump_frame = true,
            path => config_path = path.to_string(),
        }
    }

    info!("{} v{}", GAME_NAME, VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let config = GameConfig::load_or_default(&config_path);
    let level = Level::load_or_builtin(&config);

    info!("=== Scripted Session ===");
    let (first, shell) = run_script(&config, &level, true);
    info!("Outcome: {:?}", first);

    info!("=== Verifying Determinism ===");
    let (second, _) = run_script(&config, &level, false);
    if first == second {
        info!("DETERMINISM VERIFIED: outcomes match");
    } else {
        return Err(anyhow!("runs diverged: {:?} vs {:?}", first, second));
    }

    if dump_frame {
        let json = serde_json::to_string_pretty(&shell.draw()).context("failed to encode frame")?;
        println!("{json}");
    }

    Ok(())
}

fn run_script(config: &GameConfig, level: &Level, log_events: bool) -> (Outcome, GameShell) {
    let mut shell = GameShell::new(config.clone(), level.clone());
    let mut total_events = 0;

    for step in SCRIPT {
        for t in 0..step.ticks {
            let mut input = InputFrame::holding(step.hold);
            if t == 0 {
                if let Some(action) = step.press {
                    input.press(action);
                }
            }

            let result = shell.tick(&input);
            total_events += result.events.len();

            if log_events {
                for event in &result.events {
                    match &event.data {
                        GameEventData::TargetHit { target, damage, killed, .. } => {
                            info!("Tick {}: hit {:?} for {} (killed: {})", event.tick, target, damage, killed);
                        }
                        GameEventData::ChestOpened { item_count, .. } => {
                            info!("Tick {}: chest opened, {} items", event.tick, item_count);
                        }
                        GameEventData::WeaponEquipped { weapon } => {
                            info!("Tick {}: equipped {}", event.tick, weapon);
                        }
                        GameEventData::DoorToggled { open, .. } => {
                            info!("Tick {}: door {}", event.tick, if *open { "opened" } else { "closed" });
                        }
                        GameEventData::StateChanged { from, to } => {
                            info!("Tick {}: {} -> {}", event.tick, from, to);
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    let session = shell.session();
    let outcome = Outcome {
        state: shell.state(),
        player: session.map(|s| s.player().rect),
        health: session.map(|s| s.player().health()),
        enemy_health: session
            .map(|s| s.enemies().iter().map(|e| e.health).collect())
            .unwrap_or_default(),
        events: total_events,
    };

    (outcome, shell)
}
