//! Newtype ids for the two occupant families.
//!
//! Kit ids and item ids come from entirely separate game tables and are only
//! ever multiplexed together at the encoded-equipment boundary, so they get
//! distinct types here.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Inventory item id, as resolved by the item metadata feed
define_id!(ItemId);
// Base-model kit id, valid for one slot and one gender
define_id!(KitId);

/// Encoded ids in `(KIT_OFFSET, ITEM_OFFSET]` are kit ids plus this offset.
pub const KIT_OFFSET: i32 = 256;
/// Encoded ids above this are item ids plus this offset.
pub const ITEM_OFFSET: i32 = 2048;

impl KitId {
    /// The encoded occupant id for this kit.
    pub fn encoded(self) -> i32 {
        self.0 + KIT_OFFSET
    }
}

impl ItemId {
    /// The encoded occupant id for this item.
    pub fn encoded(self) -> i32 {
        self.0 + ITEM_OFFSET
    }
}
