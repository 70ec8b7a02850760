//! Level Objects
//!
//! Everything placed in a level that is not an actor. Capabilities are
//! plain methods on [`GameObject`] that match on the variant:
//!
//! | Variant  | Solid        | Interact            |
//! |----------|--------------|---------------------|
//! | Wall     | always       | no                  |
//! | Door     | while closed | toggles open/closed |
//! | Chest    | always       | opens once          |
//! | Obstacle | always       | no                  |
//!
//! Every object also carries a visibility flag. Hidden objects still block
//! and interact; they are just not drawn.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::colour::{Palette, Rgb};
use crate::core::rect::Rect;
use crate::game::item::Item;
use crate::render::DrawCommand;

/// Chest size when a level does not give one.
pub const CHEST_SIZE: (i32, i32) = (40, 30);

fn visible_by_default() -> bool {
    true
}

/// Static blocking box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    /// Bounding box
    pub rect: Rect,
    /// Drawn when true
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

/// A door that blocks while closed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Bounding box
    pub rect: Rect,
    /// Drawn when true
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    is_open: bool,
}

impl Door {
    /// Create a closed door.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            visible: true,
            is_open: false,
        }
    }

    /// Check if the door is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open or close the door.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }
}

/// A chest holding items until first opened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    /// Bounding box
    pub rect: Rect,
    /// Drawn when true
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    is_open: bool,
    contents: Vec<Item>,
}

impl Chest {
    /// Create a closed chest at a position with the default size.
    pub fn new(x: i32, y: i32, contents: Vec<Item>) -> Self {
        Self::with_rect(Rect::new(x, y, CHEST_SIZE.0, CHEST_SIZE.1), contents)
    }

    /// Create a closed chest with an explicit box.
    pub fn with_rect(rect: Rect, contents: Vec<Item>) -> Self {
        Self {
            rect,
            visible: true,
            is_open: false,
            contents,
        }
    }

    /// Check if the chest has been opened.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Items still inside.
    #[inline]
    pub fn contents(&self) -> &[Item] {
        &self.contents
    }

    /// Open the chest. The first call yields every item; later calls yield
    /// nothing.
    pub fn open(&mut self) -> Vec<Item> {
        if self.is_open {
            return Vec::new();
        }
        self.is_open = true;
        std::mem::take(&mut self.contents)
    }
}

/// Blocking debris with an optional custom colour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Bounding box
    pub rect: Rect,
    /// Overrides the palette's debris colour
    pub colour: Option<Rgb>,
    /// Drawn when true
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

/// Outcome of interacting with an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Door is now open
    DoorOpened,
    /// Door is now closed
    DoorClosed,
    /// Chest opened for the first time
    ChestOpened {
        /// Everything that was inside
        items: Vec<Item>,
    },
    /// Chest was already open
    ChestAlreadyOpen,
}

/// A placed level object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameObject {
    /// Wall
    Wall(Wall),
    /// Door
    Door(Door),
    /// Chest
    Chest(Chest),
    /// Obstacle
    Obstacle(Obstacle),
}

impl GameObject {
    /// Create a wall.
    pub fn wall(rect: Rect) -> Self {
        GameObject::Wall(Wall { rect, visible: true })
    }

    /// Create a closed door.
    pub fn door(rect: Rect) -> Self {
        GameObject::Door(Door::new(rect))
    }

    /// Create a closed chest.
    pub fn chest(rect: Rect, contents: Vec<Item>) -> Self {
        GameObject::Chest(Chest::with_rect(rect, contents))
    }

    /// Create an obstacle.
    pub fn obstacle(rect: Rect, colour: Option<Rgb>) -> Self {
        GameObject::Obstacle(Obstacle {
            rect,
            colour,
            visible: true,
        })
    }

    /// Bounding box.
    pub fn rect(&self) -> Rect {
        match self {
            GameObject::Wall(w) => w.rect,
            GameObject::Door(d) => d.rect,
            GameObject::Chest(c) => c.rect,
            GameObject::Obstacle(o) => o.rect,
        }
    }

    /// Check if this object blocks movement right now.
    pub fn is_solid(&self) -> bool {
        match self {
            GameObject::Door(d) => !d.is_open,
            GameObject::Wall(_) | GameObject::Chest(_) | GameObject::Obstacle(_) => true,
        }
    }

    /// Blocking box, if solid.
    #[inline]
    pub fn collider(&self) -> Option<Rect> {
        self.is_solid().then(|| self.rect())
    }

    /// Same object with its visibility set.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.set_visible(visible);
        self
    }

    /// Check if this object is drawn.
    pub fn is_visible(&self) -> bool {
        match self {
            GameObject::Wall(w) => w.visible,
            GameObject::Door(d) => d.visible,
            GameObject::Chest(c) => c.visible,
            GameObject::Obstacle(o) => o.visible,
        }
    }

    /// Show or hide this object. Collision and interaction are unaffected.
    pub fn set_visible(&mut self, visible: bool) {
        let flag = match self {
            GameObject::Wall(w) => &mut w.visible,
            GameObject::Door(d) => &mut d.visible,
            GameObject::Chest(c) => &mut c.visible,
            GameObject::Obstacle(o) => &mut o.visible,
        };
        *flag = visible;
    }

    /// Check if the player can interact with this object.
    #[inline]
    pub fn is_interactable(&self) -> bool {
        matches!(self, GameObject::Door(_) | GameObject::Chest(_))
    }

    /// Interact with this object. `None` for objects that do not react.
    pub fn interact(&mut self) -> Option<Interaction> {
        let outcome = match self {
            GameObject::Door(door) => {
                if door.toggle() {
                    Interaction::DoorOpened
                } else {
                    Interaction::DoorClosed
                }
            }
            GameObject::Chest(chest) => {
                if chest.is_open() {
                    Interaction::ChestAlreadyOpen
                } else {
                    Interaction::ChestOpened { items: chest.open() }
                }
            }
            GameObject::Wall(_) | GameObject::Obstacle(_) => return None,
        };

        debug!("Interacted with object at {:?}: {:?}", self.rect(), outcome);
        Some(outcome)
    }

    /// Fill colour for the current state.
    pub fn colour(&self, palette: &Palette) -> Rgb {
        match self {
            GameObject::Wall(_) => palette.wall,
            GameObject::Door(d) => palette.door.for_state(d.is_open),
            GameObject::Chest(c) => palette.chest.for_state(c.is_open),
            GameObject::Obstacle(o) => o.colour.unwrap_or(palette.debris),
        }
    }

    /// Draw command for this object, `None` if invisible.
    pub fn draw(&self, palette: &Palette) -> Option<DrawCommand> {
        self.is_visible()
            .then(|| DrawCommand::solid(self.rect(), self.colour(palette)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_lockstep() {
        let palette = Palette::DEFAULT;
        let mut door = GameObject::door(Rect::new(0, 0, 20, 50));

        assert!(door.is_solid());
        assert_eq!(door.colour(&palette), palette.door.closed);

        for round in 0..4 {
            let outcome = door.interact().unwrap();
            let open = round % 2 == 0;
            assert_eq!(outcome, if open { Interaction::DoorOpened } else { Interaction::DoorClosed });
            assert_eq!(door.is_solid(), !open);
            assert_eq!(door.collider().is_some(), !open);
            assert_eq!(door.colour(&palette), palette.door.for_state(open));
        }
    }

    #[test]
    fn test_chest_yields_once() {
        let items = vec![Item::weapon("sword"), Item::potion("Potion", 20)];
        let mut chest = GameObject::chest(Rect::new(0, 0, 40, 30), items.clone());

        assert_eq!(chest.interact(), Some(Interaction::ChestOpened { items }));
        assert_eq!(chest.interact(), Some(Interaction::ChestAlreadyOpen));
        assert!(chest.is_solid());

        if let GameObject::Chest(c) = &chest {
            assert!(c.is_open());
            assert!(c.contents().is_empty());
        }
    }

    #[test]
    fn test_chest_open_directly() {
        let mut chest = Chest::new(10, 10, vec![Item::treasure("Gold", 5)]);
        assert_eq!(chest.rect, Rect::new(10, 10, 40, 30));
        assert_eq!(chest.open().len(), 1);
        assert!(chest.open().is_empty());
    }

    #[test]
    fn test_wall_and_obstacle_are_inert() {
        let palette = Palette::DEFAULT;
        let mut wall = GameObject::wall(Rect::new(0, 0, 24, 24));
        let mut rock = GameObject::obstacle(Rect::new(0, 0, 50, 50), Some(Rgb(1, 2, 3)));
        let mut debris = GameObject::obstacle(Rect::new(0, 0, 50, 50), None);

        assert!(!wall.is_interactable());
        assert_eq!(wall.interact(), None);
        assert_eq!(rock.interact(), None);
        assert!(wall.is_solid() && rock.is_solid());

        assert_eq!(rock.colour(&palette), Rgb(1, 2, 3));
        assert_eq!(debris.colour(&palette), palette.debris);
        assert!(debris.interact().is_none());
    }

    #[test]
    fn test_draw_uses_state_colour() {
        let palette = Palette::DEFAULT;
        let mut door = GameObject::door(Rect::new(5, 5, 20, 50));
        door.interact();
        assert_eq!(
            door.draw(&palette),
            Some(DrawCommand::solid(Rect::new(5, 5, 20, 50), palette.door.opened))
        );
    }

    #[test]
    fn test_hidden_object_still_blocks() {
        let palette = Palette::DEFAULT;
        let mut wall = GameObject::wall(Rect::new(0, 0, 24, 24));
        assert!(wall.is_visible());

        wall.set_visible(false);
        assert!(!wall.is_visible());
        assert_eq!(wall.draw(&palette), None);
        assert_eq!(wall.collider(), Some(Rect::new(0, 0, 24, 24)));

        let mut door = GameObject::door(Rect::new(0, 0, 20, 50)).with_visible(false);
        assert_eq!(door.draw(&palette), None);
        assert!(door.is_solid());
        assert_eq!(door.interact(), Some(Interaction::DoorOpened));
        assert!(!door.is_visible());

        wall.set_visible(true);
        assert!(wall.draw(&palette).is_some());
    }

    #[test]
    fn test_visibility_defaults_on_when_missing() {
        let json = r#"{ "Wall": { "rect": { "x": 1, "y": 2, "width": 3, "height": 4 } } }"#;
        let wall: GameObject = serde_json::from_str(json).unwrap();
        assert!(wall.is_visible());
    }
}
