//! Draw Commands
//!
//! The game describes each frame as a flat list of [`DrawCommand`]s in
//! painter's order. A front end turns them into whatever its renderer
//! needs; nothing here knows about windows, fonts or textures.

use serde::{Serialize, Deserialize};

use crate::core::colour::{HealthBarColours, Rgb};
use crate::core::rect::{Point, Rect};

/// Full-screen image slots a front end may fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundKind {
    /// Main menu backdrop
    MainMenu,
    /// In-game backdrop
    Game,
}

/// Text size classes, as a fraction of screen height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextSize {
    /// Headings (12%)
    Title,
    /// Menu entries and instructions (6%)
    Menu,
    /// Hints (4%)
    Small,
}

impl TextSize {
    /// Font height in pixels for a given screen height.
    pub fn pixels(self, screen_height: i32) -> f32 {
        let fraction = match self {
            TextSize::Title => 0.12,
            TextSize::Menu => 0.06,
            TextSize::Small => 0.04,
        };
        screen_height as f32 * fraction
    }
}

/// One drawing step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clear the screen to a colour
    Fill(Rgb),

    /// Full-screen image, drawn as `fallback` if the image is unavailable
    Background {
        /// Which image
        kind: BackgroundKind,
        /// Colour used when the image is missing
        fallback: Rgb,
    },

    /// Filled box
    Rect {
        /// Box in screen pixels
        rect: Rect,
        /// Fill colour
        colour: Rgb,
        /// Opacity, 255 is opaque
        alpha: u8,
    },

    /// Box outline
    Outline {
        /// Box in screen pixels
        rect: Rect,
        /// Line colour
        colour: Rgb,
        /// Line thickness in pixels
        thickness: i32,
    },

    /// Full-screen translucent black
    Overlay {
        /// Opacity, 255 is opaque
        alpha: u8,
    },

    /// Centred text
    Text {
        /// Contents
        text: String,
        /// Centre in screen pixels
        centre: Point,
        /// Size class
        size: TextSize,
        /// Fill colour
        colour: Rgb,
        /// Outline colour, if outlined
        outline: Option<Rgb>,
    },
}

impl DrawCommand {
    /// Opaque filled box.
    #[inline]
    pub fn solid(rect: Rect, colour: Rgb) -> Self {
        DrawCommand::Rect {
            rect,
            colour,
            alpha: 255,
        }
    }

    /// Centred text with no outline.
    pub fn text(text: impl Into<String>, centre: Point, size: TextSize, colour: Rgb) -> Self {
        DrawCommand::Text {
            text: text.into(),
            centre,
            size,
            colour,
            outline: None,
        }
    }

    /// Centred text with an outline.
    pub fn outlined_text(
        text: impl Into<String>,
        centre: Point,
        size: TextSize,
        colour: Rgb,
        outline: Rgb,
    ) -> Self {
        DrawCommand::Text {
            text: text.into(),
            centre,
            size,
            colour,
            outline: Some(outline),
        }
    }
}

/// Everything to draw for one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Commands in painter's order
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Append a command if there is one.
    #[inline]
    pub fn push_opt(&mut self, command: Option<DrawCommand>) {
        if let Some(command) = command {
            self.commands.push(command);
        }
    }

    /// Number of commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing is drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over text contents, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Health bar placement.
pub const HEALTH_BAR: Rect = Rect::new(20, 20, 200, 20);

/// Draw a health bar: empty track, filled part, outline.
///
/// The fill turns red at or below a quarter of max health.
pub fn health_bar(frame: &mut Frame, health: u32, max_health: u32, colours: &HealthBarColours) {
    let max = max_health.max(1);
    let health = health.min(max);
    let fill_width = (HEALTH_BAR.width as i64 * health as i64 / max as i64) as i32;
    let fill = if health * 4 <= max { colours.red } else { colours.green };

    frame.push(DrawCommand::solid(HEALTH_BAR, colours.empty));
    if fill_width > 0 {
        frame.push(DrawCommand::solid(
            Rect::new(HEALTH_BAR.x, HEALTH_BAR.y, fill_width, HEALTH_BAR.height),
            fill,
        ));
    }
    frame.push(DrawCommand::Outline {
        rect: HEALTH_BAR,
        colour: colours.outline,
        thickness: 2,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour::Palette;

    fn fill_of(frame: &Frame) -> Option<(i32, Rgb)> {
        frame.commands.iter().skip(1).find_map(|c| match c {
            DrawCommand::Rect { rect, colour, .. } => Some((rect.width, *colour)),
            _ => None,
        })
    }

    #[test]
    fn test_health_bar_scales() {
        let colours = Palette::DEFAULT.healthbar;

        let mut frame = Frame::new();
        health_bar(&mut frame, 100, 100, &colours);
        assert_eq!(fill_of(&frame), Some((200, colours.green)));

        let mut frame = Frame::new();
        health_bar(&mut frame, 20, 100, &colours);
        assert_eq!(fill_of(&frame), Some((40, colours.red)));

        let mut frame = Frame::new();
        health_bar(&mut frame, 0, 100, &colours);
        assert_eq!(fill_of(&frame), None);
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn test_text_sizes() {
        assert_eq!(TextSize::Title.pixels(720).round(), 86.0);
        assert_eq!(TextSize::Small.pixels(100).round(), 4.0);
    }
}
