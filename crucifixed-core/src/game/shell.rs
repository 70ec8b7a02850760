//! Game State Shell
//!
//! Top-level state machine. Exactly one state is active; each tick runs
//! that state's input handling and update, and [`GameShell::draw`] runs
//! its draw routine.
//!
//! ```text
//!            Play                      Pause
//! MainMenu ────────► Playing ◄──────────────────► Paused
//!    ▲                  │                           │
//!    │                  │ health reaches 0          │ Cancel
//!    │                  ▼                           │
//!    └──── Cancel ── GameOver ── Confirm ─► Playing │
//!    ▲                                              │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! Quit from the main menu ends the run.

use std::fmt;

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::config::GameConfig;
use crate::core::colour::{Palette, Rgb};
use crate::core::rect::Point;
use crate::game::events::GameEvent;
use crate::game::input::{Action, InputFrame};
use crate::game::level::Level;
use crate::game::session::Session;
use crate::render::{BackgroundKind, DrawCommand, Frame, TextSize};
use crate::GAME_NAME;

/// Overlay opacity behind the main menu.
const MENU_OVERLAY_ALPHA: u8 = 110;

/// Overlay opacity over the paused game.
const PAUSE_OVERLAY_ALPHA: u8 = 160;

/// Screen layout, in percent of screen height.
mod layout {
    pub const TITLE_Y: i32 = 25;
    pub const MENU_START_Y: i32 = 42;
    pub const MENU_SPACING: i32 = 8;
    pub const HINT_Y: i32 = 83;
    pub const HEADING_Y: i32 = 42;
    pub const FIRST_LINE_GAP: i32 = 12;
    pub const SECOND_LINE_GAP: i32 = 7;
    /// Menu font height, also the clickable row height
    pub const MENU_ROW: i32 = 6;
}

/// Top-level game state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen with the main menu
    #[default]
    MainMenu,
    /// A session is running
    Playing,
    /// A session is suspended
    Paused,
    /// The player died
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::MainMenu => "MainMenu",
            GameState::Playing => "Playing",
            GameState::Paused => "Paused",
            GameState::GameOver => "GameOver",
        };
        f.write_str(name)
    }
}

/// Main menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuItem {
    /// Start a session
    Play,
    /// Settings (no screen yet)
    Settings,
    /// Leave the game
    Quit,
}

impl MenuItem {
    /// Entries in display order.
    pub const ALL: [MenuItem; 3] = [MenuItem::Play, MenuItem::Settings, MenuItem::Quit];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::Settings => "Settings",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Main menu selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MainMenu {
    selected: usize,
}

impl MainMenu {
    /// Index of the highlighted entry.
    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The highlighted entry.
    #[inline]
    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    /// Move the highlight up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        let n = MenuItem::ALL.len();
        self.selected = (self.selected + n - 1) % n;
    }

    /// Move the highlight down, wrapping to the top.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::ALL.len();
    }

    /// Highlight an entry by index. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < MenuItem::ALL.len() {
            self.selected = index;
        }
    }

    /// Vertical centre of an entry's row.
    pub fn row_y(index: usize, screen_height: i32) -> i32 {
        percent(
            screen_height,
            layout::MENU_START_Y + index as i32 * layout::MENU_SPACING,
        )
    }

    /// Entry whose row contains a screen y coordinate.
    pub fn item_at(y: i32, screen_height: i32) -> Option<usize> {
        let half = percent(screen_height, layout::MENU_ROW) / 2;
        (0..MenuItem::ALL.len()).find(|&i| {
            let centre = Self::row_y(i, screen_height);
            y >= centre - half && y <= centre + half
        })
    }
}

/// What one shell tick produced.
#[derive(Clone, Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// State after the tick
    pub state: GameState,
    /// The player chose Quit
    pub quit: bool,
}

/// The game: state machine plus the active session, if any.
#[derive(Debug)]
pub struct GameShell {
    config: GameConfig,
    level: Level,
    palette: Palette,
    state: GameState,
    menu: MainMenu,
    session: Option<Session>,
    running: bool,
    ticks: u32,
}

impl GameShell {
    /// Create a shell on the main menu.
    pub fn new(config: GameConfig, level: Level) -> Self {
        Self {
            config,
            level,
            palette: Palette::DEFAULT,
            state: GameState::MainMenu,
            menu: MainMenu::default(),
            session: None,
            running: true,
            ticks: 0,
        }
    }

    /// Create a shell, loading the configured level (or the built-in one).
    pub fn from_config(config: GameConfig) -> Self {
        let level = Level::load_or_builtin(&config);
        Self::new(config, level)
    }

    /// Draw with a different palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Active state.
    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// False once Quit was chosen.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Configuration.
    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Colours used for drawing.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Main menu selection.
    #[inline]
    pub fn menu(&self) -> &MainMenu {
        &self.menu
    }

    /// The running or paused session.
    #[inline]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The running or paused session, mutably.
    #[inline]
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Shell ticks run so far.
    #[inline]
    pub fn tick_count(&self) -> u32 {
        self.ticks
    }

    /// Run one tick of the active state.
    pub fn tick(&mut self, input: &InputFrame) -> TickResult {
        let mut events = Vec::new();

        if self.running {
            match self.state {
                GameState::MainMenu => self.handle_menu_input(input, &mut events),
                GameState::Playing => {
                    self.handle_playing_input(input, &mut events);
                    if self.state == GameState::Playing {
                        self.update_playing(input, &mut events);
                    }
                }
                GameState::Paused => self.handle_paused_input(input, &mut events),
                GameState::GameOver => self.handle_game_over_input(input, &mut events),
            }
        }

        self.ticks += 1;
        TickResult {
            events,
            state: self.state,
            quit: !self.running,
        }
    }

    fn transition(&mut self, to: GameState, events: &mut Vec<GameEvent>) {
        if self.state == to {
            return;
        }
        info!("State {} -> {}", self.state, to);
        events.push(GameEvent::state_changed(self.ticks, self.state, to));
        self.state = to;
    }

    /// Throw away any session and begin a new one.
    fn start_game(&mut self, events: &mut Vec<GameEvent>) {
        self.session = Some(Session::new(&self.level, &self.config));
        self.transition(GameState::Playing, events);
    }

    fn quit_to_menu(&mut self, events: &mut Vec<GameEvent>) {
        self.session = None;
        self.transition(GameState::MainMenu, events);
    }

    // ==================== MAIN MENU ====================

    fn handle_menu_input(&mut self, input: &InputFrame, events: &mut Vec<GameEvent>) {
        if input.is_pressed(Action::MoveUp) {
            self.menu.select_previous();
        } else if input.is_pressed(Action::MoveDown) {
            self.menu.select_next();
        }

        if input.clicked {
            let clicked_row = input
                .pointer
                .and_then(|p| MainMenu::item_at(p.y, self.config.screen_height));
            if let Some(index) = clicked_row {
                self.menu.select(index);
                self.activate_menu_item(events);
                return;
            }
        }

        if input.is_pressed(Action::Confirm) {
            self.activate_menu_item(events);
        }
    }

    fn activate_menu_item(&mut self, events: &mut Vec<GameEvent>) {
        match self.menu.selected_item() {
            MenuItem::Play => self.start_game(events),
            MenuItem::Settings => info!("Settings selected; no settings screen yet"),
            MenuItem::Quit => {
                info!("Quit selected");
                self.running = false;
            }
        }
    }

    fn draw_main_menu(&self, frame: &mut Frame) {
        let palette = &self.palette;
        let h = self.config.screen_height;
        let cx = self.config.screen_width / 2;

        frame.push(DrawCommand::Background {
            kind: BackgroundKind::MainMenu,
            fallback: palette.background,
        });
        frame.push(DrawCommand::Overlay {
            alpha: MENU_OVERLAY_ALPHA,
        });

        frame.push(DrawCommand::outlined_text(
            GAME_NAME,
            Point::new(cx, percent(h, layout::TITLE_Y)),
            TextSize::Title,
            palette.menu.text,
            palette.menu.outline,
        ));

        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let colour = if i == self.menu.selected {
                palette.menu.selected
            } else {
                palette.menu.text
            };
            frame.push(DrawCommand::outlined_text(
                item.label(),
                Point::new(cx, MainMenu::row_y(i, h)),
                TextSize::Menu,
                colour,
                palette.menu.outline,
            ));
        }

        frame.push(DrawCommand::outlined_text(
            "Use arrow keys and Enter, or click to select",
            Point::new(cx, percent(h, layout::HINT_Y)),
            TextSize::Small,
            palette.menu.hint,
            palette.menu.outline,
        ));
    }

    // ==================== PLAYING ====================

    fn handle_playing_input(&mut self, input: &InputFrame, events: &mut Vec<GameEvent>) {
        if input.is_pressed(Action::Pause) {
            self.transition(GameState::Paused, events);
        }
    }

    fn update_playing(&mut self, input: &InputFrame, events: &mut Vec<GameEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        events.extend(session.tick(input));

        if session.is_over() {
            self.transition(GameState::GameOver, events);
        }
    }

    fn draw_playing(&self, frame: &mut Frame) {
        if let Some(session) = &self.session {
            session.draw(&self.palette, frame);
        }
    }

    // ==================== PAUSED ====================

    fn handle_paused_input(&mut self, input: &InputFrame, events: &mut Vec<GameEvent>) {
        if input.is_pressed(Action::Pause) {
            self.transition(GameState::Playing, events);
        } else if input.is_pressed(Action::Cancel) {
            self.quit_to_menu(events);
        }
    }

    fn draw_paused(&self, frame: &mut Frame) {
        self.draw_playing(frame);
        frame.push(DrawCommand::Overlay {
            alpha: PAUSE_OVERLAY_ALPHA,
        });
        self.draw_message(
            frame,
            "PAUSED",
            self.palette.menu.text,
            "Press ESC to resume",
            "Press Q to quit to main menu",
        );
    }

    // ==================== GAME OVER ====================

    fn handle_game_over_input(&mut self, input: &InputFrame, events: &mut Vec<GameEvent>) {
        if input.is_pressed(Action::Confirm) {
            self.start_game(events);
        } else if input.is_pressed(Action::Cancel) {
            self.quit_to_menu(events);
        }
    }

    fn draw_game_over(&self, frame: &mut Frame) {
        frame.push(DrawCommand::Fill(self.palette.background));
        self.draw_message(
            frame,
            "GAME OVER",
            self.palette.menu.game_over,
            "Press SPACE to restart",
            "Press Q to quit to main menu",
        );
    }

    /// Heading plus two instruction lines, centred.
    fn draw_message(
        &self,
        frame: &mut Frame,
        heading: &str,
        heading_colour: Rgb,
        first: &str,
        second: &str,
    ) {
        let h = self.config.screen_height;
        let cx = self.config.screen_width / 2;
        let heading_y = percent(h, layout::HEADING_Y);
        let first_y = heading_y + percent(h, layout::FIRST_LINE_GAP);
        let second_y = first_y + percent(h, layout::SECOND_LINE_GAP);
        let text = self.palette.menu.text;

        frame.push(DrawCommand::text(heading, Point::new(cx, heading_y), TextSize::Title, heading_colour));
        frame.push(DrawCommand::text(first, Point::new(cx, first_y), TextSize::Menu, text));
        frame.push(DrawCommand::text(second, Point::new(cx, second_y), TextSize::Menu, text));
    }

    /// Draw the active state.
    pub fn draw(&self) -> Frame {
        let mut frame = Frame::new();
        frame.push(DrawCommand::Fill(self.palette.background));

        match self.state {
            GameState::MainMenu => self.draw_main_menu(&mut frame),
            GameState::Playing => self.draw_playing(&mut frame),
            GameState::Paused => self.draw_paused(&mut frame),
            GameState::GameOver => self.draw_game_over(&mut frame),
        }

        frame
    }
}

#[inline]
fn percent(total: i32, pct: i32) -> i32 {
    total * pct / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combat::Damageable;

    fn shell() -> GameShell {
        let config = GameConfig::default();
        let level = Level::builtin(&config);
        GameShell::new(config, level)
    }

    fn press(shell: &mut GameShell, action: Action) -> TickResult {
        shell.tick(&InputFrame::pressing(action))
    }

    #[test]
    fn test_starts_on_main_menu() {
        let shell = shell();
        assert_eq!(shell.state(), GameState::MainMenu);
        assert!(shell.session().is_none());
        assert!(shell.is_running());
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut shell = shell();
        press(&mut shell, Action::MoveUp);
        assert_eq!(shell.menu().selected_item(), MenuItem::Quit);
        press(&mut shell, Action::MoveDown);
        assert_eq!(shell.menu().selected_item(), MenuItem::Play);
        press(&mut shell, Action::MoveDown);
        assert_eq!(shell.menu().selected_item(), MenuItem::Settings);
    }

    #[test]
    fn test_play_pause_resume() {
        let mut shell = shell();
        let result = press(&mut shell, Action::Confirm);
        assert_eq!(result.state, GameState::Playing);
        assert_eq!(result.events.len(), 1);
        assert!(shell.session().is_some());

        let ticks_before = shell.session().map(Session::tick_count);
        assert_eq!(press(&mut shell, Action::Pause).state, GameState::Paused);
        // The pausing tick does not advance the session
        assert_eq!(shell.session().map(Session::tick_count), ticks_before);

        shell.tick(&InputFrame::new());
        assert_eq!(shell.session().map(Session::tick_count), ticks_before);

        assert_eq!(press(&mut shell, Action::Pause).state, GameState::Playing);
    }

    #[test]
    fn test_cancel_from_pause_drops_session() {
        let mut shell = shell();
        press(&mut shell, Action::Confirm);
        press(&mut shell, Action::Pause);
        assert_eq!(press(&mut shell, Action::Cancel).state, GameState::MainMenu);
        assert!(shell.session().is_none());
    }

    #[test]
    fn test_settings_stays_on_menu() {
        let mut shell = shell();
        press(&mut shell, Action::MoveDown);
        let result = press(&mut shell, Action::Confirm);
        assert_eq!(result.state, GameState::MainMenu);
        assert!(result.events.is_empty());
        assert!(!result.quit);
    }

    #[test]
    fn test_quit() {
        let mut shell = shell();
        press(&mut shell, Action::MoveUp);
        let result = press(&mut shell, Action::Confirm);
        assert!(result.quit);
        assert!(!shell.is_running());

        // Nothing happens after quitting
        let after = press(&mut shell, Action::Confirm);
        assert_eq!(after.state, GameState::MainMenu);
        assert!(after.quit);
    }

    #[test]
    fn test_click_activates_row() {
        let mut shell = shell();
        let quit_row = MainMenu::row_y(2, 720);
        let result = shell.tick(&InputFrame::click_at(Point::new(640, quit_row + 5)));
        assert!(result.quit);

        let mut shell = self::shell();
        let result = shell.tick(&InputFrame::click_at(Point::new(640, 10)));
        assert!(!result.quit);
        assert_eq!(result.state, GameState::MainMenu);
    }

    #[test]
    fn test_death_then_restart() {
        let mut shell = shell();
        press(&mut shell, Action::Confirm);

        if let Some(session) = shell.session_mut() {
            session.player_mut().take_damage(1000);
        }
        assert_eq!(shell.tick(&InputFrame::new()).state, GameState::GameOver);

        let result = press(&mut shell, Action::Confirm);
        assert_eq!(result.state, GameState::Playing);
        let health = shell.session().map(|s| s.player().health());
        assert_eq!(health, Some(100));
    }

    #[test]
    fn test_menu_item_rows() {
        assert_eq!(MainMenu::row_y(0, 720), 302);
        assert_eq!(MainMenu::item_at(302, 720), Some(0));
        assert_eq!(MainMenu::item_at(360, 720), Some(1));
        assert_eq!(MainMenu::item_at(330, 720), None);
    }

    #[test]
    fn test_draw_texts_per_state() {
        let mut shell = shell();
        let menu: Vec<String> = shell.draw().texts().map(String::from).collect();
        assert_eq!(menu[0], GAME_NAME);
        assert!(menu.contains(&"Settings".to_string()));

        press(&mut shell, Action::Confirm);
        press(&mut shell, Action::Pause);
        let paused: Vec<String> = shell.draw().texts().map(String::from).collect();
        assert!(paused.contains(&"PAUSED".to_string()));
        assert!(paused.contains(&"Press ESC to resume".to_string()));
    }
}
