//! Colour Palette
//!
//! Every colour the game draws with, as one constant tree. Draw routines
//! take a `&Palette`; front ends may build their own but most use
//! [`Palette::DEFAULT`].

use serde::{Serialize, Deserialize};

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure black
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Pure white
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Pure red
    pub const RED: Rgb = Rgb(255, 0, 0);
    /// Menu highlight yellow
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    /// Mid grey
    pub const GREY: Rgb = Rgb(128, 128, 128);
}

/// Colours for something that is either open or closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenClosed {
    /// Colour while closed
    pub closed: Rgb,
    /// Colour while open
    pub opened: Rgb,
}

impl OpenClosed {
    /// Pick the colour for a state.
    #[inline]
    pub const fn for_state(&self, is_open: bool) -> Rgb {
        if is_open { self.opened } else { self.closed }
    }
}

/// Player body colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerColours {
    /// Body fill
    pub main: Rgb,
    /// Accent used by the health bar fill
    pub healthbar: Rgb,
}

/// Health bar colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthBarColours {
    /// Remaining health
    pub green: Rgb,
    /// Low health
    pub red: Rgb,
    /// Missing health
    pub empty: Rgb,
    /// Frame
    pub outline: Rgb,
}

/// Menu and overlay text colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuColours {
    /// Title and plain text
    pub text: Rgb,
    /// Selected menu item
    pub selected: Rgb,
    /// Controls hint
    pub hint: Rgb,
    /// Text outline
    pub outline: Rgb,
    /// Game over heading
    pub game_over: Rgb,
}

/// Every colour used by draw routines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Screen clear colour
    pub background: Rgb,
    /// Floor behind the level while playing
    pub floor: Rgb,
    /// Level ground tiles
    pub tile: Rgb,
    /// Walls
    pub wall: Rgb,
    /// Doors
    pub door: OpenClosed,
    /// Chests
    pub chest: OpenClosed,
    /// Default obstacle colour
    pub debris: Rgb,
    /// Enemies
    pub enemy: Rgb,
    /// Player
    pub player: PlayerColours,
    /// Health bar
    pub healthbar: HealthBarColours,
    /// Attack area preview
    pub attack_preview: Rgb,
    /// Menus
    pub menu: MenuColours,
}

impl Palette {
    /// The game's colours.
    pub const DEFAULT: Palette = Palette {
        background: Rgb(0, 0, 0),
        floor: Rgb(128, 128, 128),
        tile: Rgb(0, 0, 0),
        wall: Rgb(255, 255, 255),
        door: OpenClosed {
            closed: Rgb(139, 69, 19),
            opened: Rgb(160, 82, 45),
        },
        chest: OpenClosed {
            closed: Rgb(101, 67, 33),
            opened: Rgb(139, 90, 43),
        },
        debris: Rgb(128, 128, 128),
        enemy: Rgb(110, 40, 140),
        player: PlayerColours {
            main: Rgb(255, 0, 0),
            healthbar: Rgb(0, 255, 0),
        },
        healthbar: HealthBarColours {
            green: Rgb(0, 117, 0),
            red: Rgb(255, 0, 0),
            empty: Rgb(120, 6, 6),
            outline: Rgb(255, 230, 255),
        },
        attack_preview: Rgb(255, 255, 0),
        menu: MenuColours {
            text: Rgb::WHITE,
            selected: Rgb::YELLOW,
            hint: Rgb::GREY,
            outline: Rgb::BLACK,
            game_over: Rgb(255, 0, 0),
        },
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_closed_pick() {
        let door = Palette::DEFAULT.door;
        assert_eq!(door.for_state(false), Rgb(139, 69, 19));
        assert_eq!(door.for_state(true), Rgb(160, 82, 45));
    }
}
