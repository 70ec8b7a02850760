//! Weapons and Attack Areas
//!
//! The registry is a static table; weapons are never created at runtime and
//! handlers hold `&'static Weapon` references into it.

use serde::{Serialize, Deserialize};

use crate::core::grid::{Direction, GridCell};

/// Shape of the cells a weapon hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaShape {
    /// The one cell in front
    Single,
    /// A ray of `range` cells
    Line,
    /// The cell in front, widened sideways for range > 1
    Cone,
    /// A disk of radius `range` around the attacker
    Circle,
}

/// Weapon family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    /// Close combat
    Melee,
    /// Bows and throwables
    Ranged,
    /// Staves and spells
    Magic,
}

/// Immutable weapon definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weapon {
    /// Registry key
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// Damage per hit
    pub damage: u32,
    /// Reach in grid cells (at least 1)
    pub range: u32,
    /// Area shape
    pub area: AreaShape,
    /// Ticks between attacks
    pub cooldown: u32,
    /// Weapon family
    pub category: WeaponCategory,
}

/// Key of the weapon every actor starts with.
pub const DEFAULT_WEAPON: &str = "fists";

/// Weapon registry.
pub static WEAPONS: [Weapon; 5] = [
    Weapon {
        key: "fists",
        name: "Fists",
        damage: 5,
        range: 1,
        area: AreaShape::Single,
        cooldown: 15,
        category: WeaponCategory::Melee,
    },
    Weapon {
        key: "sword",
        name: "Iron Sword",
        damage: 20,
        range: 1,
        area: AreaShape::Cone,
        cooldown: 25,
        category: WeaponCategory::Melee,
    },
    Weapon {
        key: "bow",
        name: "Wooden Bow",
        damage: 15,
        range: 5,
        area: AreaShape::Line,
        cooldown: 35,
        category: WeaponCategory::Ranged,
    },
    Weapon {
        key: "staff",
        name: "Magic Staff",
        damage: 25,
        range: 2,
        area: AreaShape::Line,
        cooldown: 40,
        category: WeaponCategory::Magic,
    },
    Weapon {
        key: "magic_blast",
        name: "Magic Blast",
        damage: 30,
        range: 2,
        area: AreaShape::Circle,
        cooldown: 50,
        category: WeaponCategory::Magic,
    },
];

/// Look up a weapon by registry key.
pub fn find_weapon(key: &str) -> Option<&'static Weapon> {
    WEAPONS.iter().find(|w| w.key == key)
}

/// The starting weapon.
pub fn default_weapon() -> &'static Weapon {
    &WEAPONS[0]
}

impl Weapon {
    /// Cells hit when attacking from `origin` while facing `facing`.
    ///
    /// Pure function of its inputs. Order is stable: line cells run outward,
    /// cone lists the forward cell first, circle runs column by column.
    pub fn attack_area(&self, origin: GridCell, facing: Direction) -> Vec<GridCell> {
        match self.area {
            AreaShape::Single => vec![origin.step(facing, 1)],
            AreaShape::Line => line_area(origin, facing, self.range),
            AreaShape::Cone => cone_area(origin, facing, self.range),
            AreaShape::Circle => circle_area(origin, self.range),
        }
    }
}

/// Attack area for a weapon. See [`Weapon::attack_area`].
#[inline]
pub fn attack_area(origin: GridCell, facing: Direction, weapon: &Weapon) -> Vec<GridCell> {
    weapon.attack_area(origin, facing)
}

fn line_area(origin: GridCell, facing: Direction, range: u32) -> Vec<GridCell> {
    (1..=range as i32).map(|i| origin.step(facing, i)).collect()
}

fn cone_area(origin: GridCell, facing: Direction, range: u32) -> Vec<GridCell> {
    let front = origin.step(facing, 1);
    let mut cells = vec![front];

    if range > 1 {
        if facing.is_vertical() {
            cells.push(front.offset(-1, 0));
            cells.push(front.offset(1, 0));
        } else {
            cells.push(front.offset(0, -1));
            cells.push(front.offset(0, 1));
        }
    }

    cells
}

fn circle_area(origin: GridCell, range: u32) -> Vec<GridCell> {
    let r = range as i32;
    let r_sq = r * r;
    let mut cells = Vec::new();

    for dx in -r..=r {
        for dy in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            if dx * dx + dy * dy <= r_sq {
                cells.push(origin.offset(dx, dy));
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn weapon(area: AreaShape, range: u32) -> Weapon {
        Weapon {
            key: "test",
            name: "Test",
            damage: 1,
            range,
            area,
            cooldown: 0,
            category: WeaponCategory::Melee,
        }
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    #[test]
    fn test_registry_invariants() {
        for w in &WEAPONS {
            assert!(w.range >= 1, "{} has range 0", w.key);
        }
        let keys: BTreeSet<_> = WEAPONS.iter().map(|w| w.key).collect();
        assert_eq!(keys.len(), WEAPONS.len());
        assert_eq!(default_weapon().key, DEFAULT_WEAPON);
    }

    #[test]
    fn test_find_weapon() {
        let sword = find_weapon("sword").unwrap();
        assert_eq!(sword.name, "Iron Sword");
        assert_eq!(sword.damage, 20);
        assert!(find_weapon("trebuchet").is_none());
    }

    #[test]
    fn test_single() {
        let fists = find_weapon("fists").unwrap();
        let cells = fists.attack_area(GridCell::new(2, 2), Direction::Left);
        assert_eq!(cells, vec![GridCell::new(1, 2)]);
    }

    #[test]
    fn test_bow_line_up() {
        let bow = find_weapon("bow").unwrap();
        let cells = attack_area(GridCell::new(3, 3), Direction::Up, bow);
        let expected: Vec<GridCell> = [(3, 2), (3, 1), (3, 0), (3, -1), (3, -2)]
            .into_iter()
            .map(GridCell::from)
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_sword_cone_range_one_is_single_cell() {
        let sword = find_weapon("sword").unwrap();
        let cells = sword.attack_area(GridCell::new(4, 4), Direction::Right);
        assert_eq!(cells, vec![GridCell::new(5, 4)]);
    }

    #[test]
    fn test_wide_cone_adds_lateral_cells() {
        let cone = weapon(AreaShape::Cone, 2);

        let right = cone.attack_area(GridCell::new(4, 4), Direction::Right);
        assert_eq!(right, vec![GridCell::new(5, 4), GridCell::new(5, 3), GridCell::new(5, 5)]);

        let down = cone.attack_area(GridCell::new(4, 4), Direction::Down);
        assert_eq!(down, vec![GridCell::new(4, 5), GridCell::new(3, 5), GridCell::new(5, 5)]);
    }

    #[test]
    fn test_magic_blast_circle() {
        let blast = find_weapon("magic_blast").unwrap();
        let cells = blast.attack_area(GridCell::new(0, 0), Direction::Down);
        // Radius 2 disk has 13 cells; minus the origin
        assert_eq!(cells.len(), 12);
        assert!(cells.contains(&GridCell::new(2, 0)));
        assert!(cells.contains(&GridCell::new(1, 1)));
        assert!(!cells.contains(&GridCell::new(2, 1)));
        assert!(!cells.contains(&GridCell::new(0, 0)));
    }

    proptest! {
        #[test]
        fn prop_line_has_range_cells_walking_outward(
            x in -100i32..100,
            y in -100i32..100,
            range in 1u32..20,
            facing in direction(),
        ) {
            let origin = GridCell::new(x, y);
            let cells = weapon(AreaShape::Line, range).attack_area(origin, facing);

            prop_assert_eq!(cells.len(), range as usize);
            for (i, cell) in cells.iter().enumerate() {
                prop_assert_eq!(cell.chebyshev(origin), i as i32 + 1);
            }
            let unique: BTreeSet<_> = cells.iter().collect();
            prop_assert_eq!(unique.len(), cells.len());
        }

        #[test]
        fn prop_circle_excludes_origin_and_stays_in_disk(
            x in -100i32..100,
            y in -100i32..100,
            range in 1u32..8,
            facing in direction(),
        ) {
            let origin = GridCell::new(x, y);
            let cells = weapon(AreaShape::Circle, range).attack_area(origin, facing);
            let r_sq = (range * range) as i32;

            prop_assert!(!cells.contains(&origin));
            for cell in &cells {
                prop_assert!(cell.distance_squared(origin) <= r_sq);
            }
            // Facing never changes a circle
            let other = weapon(AreaShape::Circle, range).attack_area(origin, facing.opposite());
            prop_assert_eq!(cells, other);
        }

        #[test]
        fn prop_attack_area_is_deterministic(
            x in -50i32..50,
            y in -50i32..50,
            idx in 0usize..5,
            facing in direction(),
        ) {
            let w = &WEAPONS[idx];
            let origin = GridCell::new(x, y);
            prop_assert_eq!(w.attack_area(origin, facing), w.attack_area(origin, facing));
        }
    }
}
