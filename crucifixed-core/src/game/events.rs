//! Game Events
//!
//! Events generated during a tick. Front ends use them for effects and
//! messages; tests use them to check what happened.

use serde::{Serialize, Deserialize};

use crate::core::grid::{Direction, GridCell};
use crate::game::combat::ActorId;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// An attack was issued
    AttackIssued {
        attacker: ActorId,
        weapon: String,
        facing: Direction,
        cells: Vec<GridCell>,
    },

    /// A target was hit
    TargetHit {
        attacker: ActorId,
        target: ActorId,
        damage: u32,
        cell: GridCell,
        killed: bool,
    },

    /// A door was opened or closed
    DoorToggled {
        object: usize,
        open: bool,
    },

    /// A chest was opened for the first time
    ChestOpened {
        object: usize,
        item_count: usize,
    },

    /// A chest was interacted with after being emptied
    ChestAlreadyOpen {
        object: usize,
    },

    /// Interact was pressed with nothing in range
    NothingToInteract,

    /// The player picked up an item
    ItemCollected {
        name: String,
    },

    /// The player equipped a weapon
    WeaponEquipped {
        weapon: String,
    },

    /// The player drank a potion
    PotionUsed {
        name: String,
        healed: u32,
    },

    /// The player died
    PlayerDied,

    /// The shell changed state
    StateChanged {
        from: String,
        to: String,
    },
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Session tick when the event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create attack issued event.
    pub fn attack_issued(
        tick: u32,
        attacker: ActorId,
        weapon: &str,
        facing: Direction,
        cells: Vec<GridCell>,
    ) -> Self {
        Self::new(
            tick,
            GameEventData::AttackIssued {
                attacker,
                weapon: weapon.to_string(),
                facing,
                cells,
            },
        )
    }

    /// Create target hit event.
    pub fn target_hit(
        tick: u32,
        attacker: ActorId,
        target: ActorId,
        damage: u32,
        cell: GridCell,
        killed: bool,
    ) -> Self {
        Self::new(
            tick,
            GameEventData::TargetHit {
                attacker,
                target,
                damage,
                cell,
                killed,
            },
        )
    }

    /// Create door toggled event.
    pub fn door_toggled(tick: u32, object: usize, open: bool) -> Self {
        Self::new(tick, GameEventData::DoorToggled { object, open })
    }

    /// Create chest opened event.
    pub fn chest_opened(tick: u32, object: usize, item_count: usize) -> Self {
        Self::new(tick, GameEventData::ChestOpened { object, item_count })
    }

    /// Create item collected event.
    pub fn item_collected(tick: u32, name: &str) -> Self {
        Self::new(tick, GameEventData::ItemCollected { name: name.to_string() })
    }

    /// Create weapon equipped event.
    pub fn weapon_equipped(tick: u32, weapon: &str) -> Self {
        Self::new(tick, GameEventData::WeaponEquipped { weapon: weapon.to_string() })
    }

    /// Create potion used event.
    pub fn potion_used(tick: u32, name: &str, healed: u32) -> Self {
        Self::new(tick, GameEventData::PotionUsed { name: name.to_string(), healed })
    }

    /// Create state changed event.
    pub fn state_changed(tick: u32, from: impl ToString, to: impl ToString) -> Self {
        Self::new(
            tick,
            GameEventData::StateChanged {
                from: from.to_string(),
                to: to.to_string(),
            },
        )
    }

    /// Check if this is a hit event.
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self.data, GameEventData::TargetHit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let hit = GameEvent::target_hit(3, ActorId::PLAYER, ActorId(1), 20, GridCell::new(5, 4), false);
        assert!(hit.is_hit());
        assert_eq!(hit.tick, 3);

        let door = GameEvent::door_toggled(4, 2, true);
        assert!(!door.is_hit());
        assert_eq!(door.data, GameEventData::DoorToggled { object: 2, open: true });
    }

    #[test]
    fn test_event_json() {
        let event = GameEvent::state_changed(0, "MainMenu", "Playing");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("StateChanged"));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
