//! Facial icons displayed on the jaw slot (minigame team badges).

use serde::{Deserialize, Serialize};

/// An icon that can be overlaid on the jaw slot. Each variant carries a
/// representative item id used for panel display and id round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JawIcon {
    Nothing,
    BaAttacker,
    BaDefender,
    BaCollector,
    BaHealer,
    SwBlue,
    SwRed,
}

impl JawIcon {
    pub const ALL: [JawIcon; 7] = [
        JawIcon::Nothing,
        JawIcon::BaAttacker,
        JawIcon::BaDefender,
        JawIcon::BaCollector,
        JawIcon::BaHealer,
        JawIcon::SwBlue,
        JawIcon::SwRed,
    ];

    /// Representative item id (-1 for no icon).
    pub fn id(self) -> i32 {
        match self {
            JawIcon::Nothing => -1,
            JawIcon::BaAttacker => 10556,
            JawIcon::BaDefender => 10558,
            JawIcon::BaCollector => 10557,
            JawIcon::BaHealer => 10559,
            JawIcon::SwBlue => 25212,
            JawIcon::SwRed => 25228,
        }
    }

    pub fn from_id(id: i32) -> Option<JawIcon> {
        JawIcon::ALL.into_iter().find(|icon| icon.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            JawIcon::Nothing => "No icon",
            JawIcon::BaAttacker => "Attacker icon",
            JawIcon::BaDefender => "Defender icon",
            JawIcon::BaCollector => "Collector icon",
            JawIcon::BaHealer => "Healer icon",
            JawIcon::SwBlue => "Blue icon",
            JawIcon::SwRed => "Red icon",
        }
    }
}
