//! Input Snapshot
//!
//! One `InputFrame` per tick. The front end decides which physical keys map
//! to which [`Action`]; the game only sees actions.
//!
//! Two bitsets are kept: `held` (down this tick, used for movement and
//! attacking) and `pressed` (went down since the previous tick, used for
//! menu navigation, pausing and interacting).

use serde::{Serialize, Deserialize};
use crate::core::rect::Point;

/// A recognised input action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Action {
    /// Move or face up
    MoveUp = 0,
    /// Move or face down
    MoveDown = 1,
    /// Move or face left
    MoveLeft = 2,
    /// Move or face right
    MoveRight = 3,
    /// Swing the equipped weapon
    Attack = 4,
    /// Use a nearby door or chest
    Interact = 5,
    /// Pause / resume
    Pause = 6,
    /// Menu select, restart
    Confirm = 7,
    /// Back out to the main menu
    Cancel = 8,
    /// Drink the first potion carried
    UsePotion = 9,
}

impl Action {
    /// Every action.
    pub const ALL: [Action; 10] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Attack,
        Action::Interact,
        Action::Pause,
        Action::Confirm,
        Action::Cancel,
        Action::UsePotion,
    ];

    /// Bit for this action.
    #[inline]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Input state for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Actions held down this tick
    pub held: u16,

    /// Actions that went down since the previous tick
    pub pressed: u16,

    /// Pointer position in screen pixels, if the pointer is over the window
    pub pointer: Option<Point>,

    /// Primary pointer button went down since the previous tick
    pub clicked: bool,
}

impl InputFrame {
    /// Create an empty input frame.
    pub const fn new() -> Self {
        Self {
            held: 0,
            pressed: 0,
            pointer: None,
            clicked: false,
        }
    }

    /// Frame with the given actions held (not freshly pressed).
    pub fn holding(actions: &[Action]) -> Self {
        let mut frame = Self::new();
        for action in actions {
            frame.set_held(*action, true);
        }
        frame
    }

    /// Frame with a single action freshly pressed (and held).
    pub fn pressing(action: Action) -> Self {
        let mut frame = Self::new();
        frame.press(action);
        frame
    }

    /// Frame with a pointer click at a screen position.
    pub fn click_at(point: Point) -> Self {
        Self {
            pointer: Some(point),
            clicked: true,
            ..Self::new()
        }
    }

    /// Check if an action is held.
    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// Check if an action went down this tick.
    #[inline]
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }

    /// Mark an action as freshly pressed and held.
    #[inline]
    pub fn press(&mut self, action: Action) {
        self.held |= action.bit();
        self.pressed |= action.bit();
    }

    /// Set the held flag for an action.
    #[inline]
    pub fn set_held(&mut self, action: Action, held: bool) {
        if held {
            self.held |= action.bit();
        } else {
            self.held &= !action.bit();
        }
    }

    /// Set the pressed flag for an action.
    #[inline]
    pub fn set_pressed(&mut self, action: Action, pressed: bool) {
        if pressed {
            self.pressed |= action.bit();
        } else {
            self.pressed &= !action.bit();
        }
    }

    /// Check if this is an idle frame (nothing held, nothing pressed, no click).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.held == 0 && self.pressed == 0 && !self.clicked
    }

    /// Fold another sample of the same tick into this one.
    ///
    /// Presses accumulate; held state and pointer take the newer sample.
    pub fn merge(&mut self, newer: &InputFrame) {
        self.held = newer.held;
        self.pressed |= newer.pressed;
        self.clicked |= newer.clicked;
        if newer.pointer.is_some() {
            self.pointer = newer.pointer;
        }
    }

    /// Clear edge-triggered state after a tick has consumed it.
    #[inline]
    pub fn clear_edges(&mut self) {
        self.pressed = 0;
        self.clicked = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================
