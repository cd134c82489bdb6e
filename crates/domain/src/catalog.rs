//! Item metadata feeds.
//!
//! Wearable-item records, animation-interference sets and idle pose
//! animations arrive as JSON produced by an external data pipeline. The
//! catalog owns the parsed feeds; callers query it per item id. An item the
//! feeds do not know about simply has no equip slot and no special behavior.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ItemId;
use crate::slot::Slot;

/// Idle pose for unarmed characters and most weapons.
pub const DEFAULT_IDLE_ANIMATION: i32 = 808;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed feed '{feed}': {source}")]
    MalformedFeed {
        feed: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("item {item} declares unknown slot index {index}")]
    UnknownSlot { item: ItemId, index: usize },
}

impl CatalogError {
    pub fn malformed(feed: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedFeed { feed, source }
    }

    pub fn unknown_slot(item: ItemId, index: usize) -> Self {
        Self::UnknownSlot { item, index }
    }
}

/// One wearable item's record in the slot feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSlotData {
    /// Equip slot index.
    #[serde(rename = "w1")]
    pub slot: usize,
    /// First hidden slot index, if the item obscures one.
    #[serde(rename = "w2")]
    pub hidden0: Option<usize>,
    /// Second hidden slot index.
    #[serde(rename = "w3")]
    pub hidden1: Option<usize>,
}

/// Animation-interference sets from the misc feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiscData {
    /// Weapon-slot items that override the weapon and hide the shield.
    #[serde(rename = "disable_anim_weapons", default)]
    pub disable_anim_weapons: HashSet<i32>,
    /// Weapon/shield-slot items that override both weapon and shield.
    #[serde(rename = "disable_anim_weapon_shield", default)]
    pub disable_anim_weapon_shield: HashSet<i32>,
}

/// Parsed feeds, queried by the engine on every composition change.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    slot_data: HashMap<ItemId, ItemSlotData>,
    misc: MiscData,
    idle_animations: HashMap<ItemId, i32>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the slot feed, a map of item id to slot record. Records with
    /// an out-of-range slot index are rejected rather than skipped since
    /// they indicate a broken feed build.
    pub fn load_slot_feed(&mut self, json: &str) -> Result<(), CatalogError> {
        let raw: HashMap<i32, ItemSlotData> =
            serde_json::from_str(json).map_err(|e| CatalogError::malformed("slots", e))?;
        for (id, data) in &raw {
            let item = ItemId(*id);
            if Slot::from_index(data.slot).is_none() {
                return Err(CatalogError::unknown_slot(item, data.slot));
            }
            for hidden in [data.hidden0, data.hidden1].into_iter().flatten() {
                if Slot::from_index(hidden).is_none() {
                    return Err(CatalogError::unknown_slot(item, hidden));
                }
            }
        }
        self.slot_data
            .extend(raw.into_iter().map(|(id, data)| (ItemId(id), data)));
        tracing::debug!(items = self.slot_data.len(), "loaded item slot feed");
        Ok(())
    }

    pub fn load_misc_feed(&mut self, json: &str) -> Result<(), CatalogError> {
        self.misc = serde_json::from_str(json).map_err(|e| CatalogError::malformed("misc", e))?;
        Ok(())
    }

    /// Registers the idle pose animation for a weapon-slot item.
    pub fn set_idle_animation(&mut self, item: ItemId, animation: i32) {
        self.idle_animations.insert(item, animation);
    }

    pub fn insert_slot_data(&mut self, item: ItemId, data: ItemSlotData) {
        self.slot_data.insert(item, data);
    }

    pub fn set_misc(&mut self, misc: MiscData) {
        self.misc = misc;
    }

    /// The slot an item equips to, if the feeds know the item.
    pub fn equip_slot(&self, item: ItemId) -> Option<Slot> {
        self.slot_data
            .get(&item)
            .and_then(|data| Slot::from_index(data.slot))
    }

    /// Slots an item obscures while worn. Empty for unknown items.
    pub fn hidden_slots(&self, item: ItemId) -> Vec<Slot> {
        let Some(data) = self.slot_data.get(&item) else {
            return Vec::new();
        };
        [data.hidden0, data.hidden1]
            .into_iter()
            .flatten()
            .filter_map(Slot::from_index)
            .collect()
    }

    /// True for weapon items that take over the weapon slot and hide the
    /// shield when detected on the real layer.
    pub fn disables_animation_weapon(&self, item: ItemId) -> bool {
        self.misc.disable_anim_weapons.contains(&item.0)
    }

    /// True for items that take over both weapon and shield when detected
    /// on the real layer.
    pub fn disables_animation_weapon_shield(&self, item: ItemId) -> bool {
        self.misc.disable_anim_weapon_shield.contains(&item.0)
    }

    /// Known idle pose animation for a weapon, if the table has one.
    pub fn idle_animation_for(&self, item: ItemId) -> Option<i32> {
        self.idle_animations.get(&item).copied()
    }

    /// Idle pose animation for a wielded weapon, defaulting when the weapon
    /// is unknown or uses the standard pose.
    pub fn idle_animation(&self, weapon: Option<ItemId>) -> i32 {
        weapon
            .and_then(|item| self.idle_animation_for(item))
            .unwrap_or(DEFAULT_IDLE_ANIMATION)
    }

    /// All items the slot feed places in the given slot.
    pub fn items_in_slot(&self, slot: Slot) -> Vec<ItemId> {
        self.slot_data
            .iter()
            .filter(|(_, data)| data.slot == slot.index())
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_slot_feed() {
        let mut catalog = ItemCatalog::new();
        catalog
            .load_slot_feed(r#"{"1042": {"w1": 0, "w2": 8}, "4151": {"w1": 3}}"#)
            .unwrap();
        assert_eq!(catalog.equip_slot(ItemId(1042)), Some(Slot::Head));
        assert_eq!(catalog.hidden_slots(ItemId(1042)), vec![Slot::Hair]);
        assert_eq!(catalog.equip_slot(ItemId(4151)), Some(Slot::Weapon));
        assert!(catalog.hidden_slots(ItemId(4151)).is_empty());
        assert_eq!(catalog.equip_slot(ItemId(9999)), None);
    }

    #[test]
    fn test_slot_feed_rejects_bad_index() {
        let mut catalog = ItemCatalog::new();
        let err = catalog
            .load_slot_feed(r#"{"7": {"w1": 99}}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSlot { .. }));
    }

    #[test]
    fn test_misc_feed_defaults_missing_sets() {
        let mut catalog = ItemCatalog::new();
        catalog
            .load_misc_feed(r#"{"disable_anim_weapons": [420]}"#)
            .unwrap();
        assert!(catalog.disables_animation_weapon(ItemId(420)));
        assert!(!catalog.disables_animation_weapon_shield(ItemId(420)));
    }

    #[test]
    fn test_idle_animation_default() {
        let mut catalog = ItemCatalog::new();
        catalog.set_idle_animation(ItemId(4151), 1832);
        assert_eq!(catalog.idle_animation(Some(ItemId(4151))), 1832);
        assert_eq!(catalog.idle_animation(Some(ItemId(1))), DEFAULT_IDLE_ANIMATION);
        assert_eq!(catalog.idle_animation(None), DEFAULT_IDLE_ANIMATION);
    }
}
