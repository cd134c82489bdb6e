//! The five recolorable sections of a character model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One recolorable section. Order matches the composed color array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorChannel {
    Hair,
    Torso,
    Legs,
    Boots,
    Skin,
}

/// Number of channels in the composed color array.
pub const CHANNEL_COUNT: usize = 5;

impl ColorChannel {
    pub const ALL: [ColorChannel; CHANNEL_COUNT] = [
        ColorChannel::Hair,
        ColorChannel::Torso,
        ColorChannel::Legs,
        ColorChannel::Boots,
        ColorChannel::Skin,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ColorChannel> {
        ColorChannel::ALL.get(index).copied()
    }
}

impl fmt::Display for ColorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorChannel::Hair => "Hair",
            ColorChannel::Torso => "Torso",
            ColorChannel::Legs => "Legs",
            ColorChannel::Boots => "Boots",
            ColorChannel::Skin => "Skin",
        };
        write!(f, "{name}")
    }
}
