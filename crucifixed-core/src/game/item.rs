//! Items found in chests and carried by the player.

use serde::{Serialize, Deserialize};

/// What an item does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Equips a weapon from the registry
    Weapon {
        /// Registry key
        weapon: String,
    },
    /// Restores health when drunk; carried until then
    Potion {
        /// Health restored
        heal: u32,
    },
    /// Worth something, does nothing
    Treasure {
        /// Value
        value: u32,
    },
}

/// An item stack of one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name
    pub name: String,
    /// Behaviour
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Weapon item named after its registry key.
    pub fn weapon(key: &str) -> Self {
        Self {
            name: key.to_string(),
            kind: ItemKind::Weapon {
                weapon: key.to_string(),
            },
        }
    }

    /// Health potion.
    pub fn potion(name: &str, heal: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::Potion { heal },
        }
    }

    /// Treasure item.
    pub fn treasure(name: &str, value: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::Treasure { value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_json_shape() {
        let json = r#"[
            { "name": "Iron Sword", "kind": "weapon", "weapon": "sword" },
            { "name": "Red Potion", "kind": "potion", "heal": 25 },
            { "name": "Gold", "kind": "treasure", "value": 50 }
        ]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();

        assert_eq!(items[0].kind, ItemKind::Weapon { weapon: "sword".into() });
        assert_eq!(items[1], Item::potion("Red Potion", 25));
        assert_eq!(items[2], Item::treasure("Gold", 50));
    }
}
