//! The twelve fixed equipment/appearance slots.
//!
//! Slot order matches the wire order of the composed equipment array; the
//! discriminant doubles as the array index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the twelve fixed appearance positions on a character model.
///
/// Hair, Arms, and Jaw can never be occupied by an item directly; they hold
/// kits, or are blanked as a side effect of an item in another slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Head,
    Cape,
    Amulet,
    Weapon,
    Torso,
    Shield,
    Arms,
    Legs,
    Hair,
    Hands,
    Boots,
    Jaw,
}

/// Number of slots in the composed equipment array.
pub const SLOT_COUNT: usize = 12;

impl Slot {
    /// All slots in wire order.
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::Head,
        Slot::Cape,
        Slot::Amulet,
        Slot::Weapon,
        Slot::Torso,
        Slot::Shield,
        Slot::Arms,
        Slot::Legs,
        Slot::Hair,
        Slot::Hands,
        Slot::Boots,
        Slot::Jaw,
    ];

    /// Index of this slot in the composed equipment array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    /// Slots that can never hold an item directly.
    #[inline]
    pub fn is_kit_only(self) -> bool {
        matches!(self, Slot::Hair | Slot::Jaw | Slot::Arms)
    }

    /// Item-only slots that may safely compose to an encoded id of 0.
    pub fn allows_nothing_item(self) -> bool {
        matches!(
            self,
            Slot::Head | Slot::Cape | Slot::Amulet | Slot::Weapon | Slot::Shield
        )
    }

    /// Slots that may hold an explicit "nothing" kit override when an item
    /// obscures them (hands/boots are possible but very rare).
    pub fn allows_nothing_kit(self) -> bool {
        matches!(
            self,
            Slot::Hair | Slot::Jaw | Slot::Arms | Slot::Hands | Slot::Boots
        )
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Head => "Head",
            Slot::Cape => "Cape",
            Slot::Amulet => "Amulet",
            Slot::Weapon => "Weapon",
            Slot::Torso => "Torso",
            Slot::Shield => "Shield",
            Slot::Arms => "Arms",
            Slot::Legs => "Legs",
            Slot::Hair => "Hair",
            Slot::Hands => "Hands",
            Slot::Boots => "Boots",
            Slot::Jaw => "Jaw",
        };
        write!(f, "{name}")
    }
}
