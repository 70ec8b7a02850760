//! Grid Cells and Facing Directions
//!
//! Combat happens on a coarse integer grid laid over pixel space. A cell is
//! found by floor-dividing a pixel position by the grid pitch, so negative
//! positions map to negative cells instead of collapsing onto cell 0.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::rect::{Point, Rect};

/// Discrete (x, y) coordinate on the combat grid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    /// Column
    pub x: i32,
    /// Row (grows downward)
    pub y: i32,
}

impl GridCell {
    /// Create a new cell.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a pixel position.
    #[inline]
    pub fn from_pixel(point: Point, pitch: i32) -> Self {
        Self {
            x: point.x.div_euclid(pitch),
            y: point.y.div_euclid(pitch),
        }
    }

    /// Pixel-space box covered by this cell.
    #[inline]
    pub fn to_rect(self, pitch: i32) -> Rect {
        Rect::new(self.x * pitch, self.y * pitch, pitch, pitch)
    }

    /// Cell `steps` cells away in `direction`.
    #[inline]
    pub fn step(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }

    /// Offset by a raw delta.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Squared Euclidean distance to another cell.
    #[inline]
    pub fn distance_squared(self, other: Self) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Chebyshev (king-move) distance to another cell.
    #[inline]
    pub fn chebyshev(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Debug for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One of the four cardinal facings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// (0, -1)
    Up,
    /// (0, 1)
    #[default]
    Down,
    /// (-1, 0)
    Left,
    /// (1, 0)
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in screen space.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction for a unit vector. Diagonals and zero have none.
    pub fn from_delta(delta: (i32, i32)) -> Option<Self> {
        match delta {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Check if this direction moves along the y axis.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Opposite direction.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Dominant cardinal direction of a pixel offset.
    ///
    /// Horizontal wins only when strictly larger; ties and the zero vector
    /// resolve vertically (zero gives `Up`).
    pub fn dominant(dx: i32, dy: i32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0 { Direction::Right } else { Direction::Left }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixel_floors_negatives() {
        assert_eq!(GridCell::from_pixel(Point::new(225, 225), 50), GridCell::new(4, 4));
        assert_eq!(GridCell::from_pixel(Point::new(-1, 49), 50), GridCell::new(-1, 0));
        assert_eq!(GridCell::from_pixel(Point::new(-50, -51), 50), GridCell::new(-1, -2));
    }

    #[test]
    fn test_step() {
        let origin = GridCell::new(3, 3);
        assert_eq!(origin.step(Direction::Up, 2), GridCell::new(3, 1));
        assert_eq!(origin.step(Direction::Right, 1), GridCell::new(4, 3));
    }

    #[test]
    fn test_delta_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_delta(dir.delta()), Some(dir));
        }
        assert_eq!(Direction::from_delta((1, 1)), None);
        assert_eq!(Direction::from_delta((0, 0)), None);
    }

    #[test]
    fn test_dominant() {
        assert_eq!(Direction::dominant(10, 3), Direction::Right);
        assert_eq!(Direction::dominant(-10, 3), Direction::Left);
        assert_eq!(Direction::dominant(3, 3), Direction::Down);
        assert_eq!(Direction::dominant(0, -4), Direction::Up);
    }

    #[test]
    fn test_default_is_down() {
        assert_eq!(Direction::default(), Direction::Down);
    }
}
