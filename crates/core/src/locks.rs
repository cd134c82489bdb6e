//! User-set guards on slots, colors, and the jaw icon.
//!
//! A lock means "do not let anything change this", including as a side
//! effect of a change elsewhere. The conflict algorithm therefore has to
//! account for hide relationships: removing a cape that hides a locked head
//! slot would un-hide it, which counts as changing it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use vestiary_domain::color::ColorChannel;
use vestiary_domain::slot::Slot;

use crate::layers::Layers;
use crate::slot_info::SlotInfo;

/// How much of a slot is locked. `Item` locks item-level changes only; a
/// kit can still be swapped underneath. `All` locks both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockStatus {
    Item,
    All,
}

#[derive(Debug, Clone, Default)]
pub struct Locks {
    slots: BTreeMap<Slot, LockStatus>,
    colors: BTreeSet<ColorChannel>,
    icon: bool,
}

impl Locks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<LockStatus> {
        self.slots.get(&slot).copied()
    }

    /// Whether the slot is locked at any level. Use [`Locks::get`] if the
    /// exact status matters.
    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn color_locked(&self, channel: ColorChannel) -> bool {
        self.colors.contains(&channel)
    }

    pub fn icon_locked(&self) -> bool {
        self.icon
    }

    pub fn set(&mut self, slot: Slot, status: Option<LockStatus>) {
        match status {
            Some(status) => {
                self.slots.insert(slot, status);
            }
            None => {
                self.slots.remove(&slot);
            }
        }
    }

    pub fn set_color(&mut self, channel: ColorChannel, locked: bool) {
        if locked {
            self.colors.insert(channel);
        } else {
            self.colors.remove(&channel);
        }
    }

    pub fn set_icon(&mut self, locked: bool) {
        self.icon = locked;
    }

    /// Cycles the slot lock: unlocked slots lock at the requested level, an
    /// item lock escalates to `All`, anything else unlocks.
    pub fn toggle(&mut self, slot: Slot, status: LockStatus) {
        let old = self.get(slot);
        if old.is_none() || (old == Some(LockStatus::Item) && status == LockStatus::All) {
            self.set(slot, Some(status));
        } else {
            self.set(slot, None);
        }
    }

    pub fn toggle_color(&mut self, channel: ColorChannel) {
        self.set_color(channel, !self.color_locked(channel));
    }

    pub fn toggle_icon(&mut self) {
        self.set_icon(!self.icon);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.colors.clear();
        self.icon = false;
    }

    pub fn slots(&self) -> &BTreeMap<Slot, LockStatus> {
        &self.slots
    }

    pub fn locked_colors(&self) -> &BTreeSet<ColorChannel> {
        &self.colors
    }

    pub fn restore(
        &mut self,
        slots: BTreeMap<Slot, LockStatus>,
        colors: BTreeSet<ColorChannel>,
        icon: bool,
    ) {
        self.slots = slots;
        self.colors = colors;
        self.icon = icon;
    }

    pub fn is_allowed(&self, slot: Slot, info: Option<&SlotInfo>, layers: &Layers) -> bool {
        self.conflicting_slots(slot, info, layers).is_empty()
    }

    /// Slots whose lock state prevents placing `info` (or unsetting, for
    /// `None`) in `slot`. Empty means the change is allowed.
    pub fn conflicting_slots(
        &self,
        slot: Slot,
        info: Option<&SlotInfo>,
        layers: &Layers,
    ) -> BTreeSet<Slot> {
        let mut conflicts = BTreeSet::new();
        let items = layers.virtual_models().items();
        let existing = items.get(slot);

        // 1. the target slot itself is locked
        if let Some(status) = self.get(slot) {
            let changing_items = existing.is_some_and(SlotInfo::is_item)
                || info.is_some_and(SlotInfo::is_item);
            if status == LockStatus::All || changing_items {
                conflicts.insert(slot);
            }
        }

        // 2. a locked item elsewhere currently hides this slot, e.g. a
        // locked full helm prevents any hair or jaw change. Conservative:
        // placing "nothing" here is still disallowed.
        for (other, item) in items.all() {
            if *other != slot && self.contains(*other) && item.hides(slot) {
                conflicts.insert(*other);
            }
        }

        // 3. would this change hide or un-hide any locked slot as a side
        // effect? The slots hidden-and-locked before and after must match,
        // counting items that this change would displace (they often
        // visually occupy the slots they hide).
        let locked: BTreeSet<Slot> = self.slots.keys().copied().collect();
        let empty = BTreeSet::new();
        let inc_hidden = info.map_or(&empty, SlotInfo::hidden);
        let out_hidden = existing.map_or(&empty, SlotInfo::hidden);
        let hidden_locked_incoming: BTreeSet<Slot> =
            inc_hidden.intersection(&locked).copied().collect();
        let mut hidden_locked_outgoing: BTreeSet<Slot> =
            out_hidden.intersection(&locked).copied().collect();
        // unlocked items the incoming item hides
        let out_inc_hides = inc_hidden
            .iter()
            .filter(|s| !self.contains(**s))
            .filter_map(|s| items.get(*s));
        // unlocked items that hide the target slot or share hidden slots
        // with the incoming item
        let out_hides_inc = items.all().values().filter(|item| {
            !self.contains(item.slot())
                && (item.hides(slot) || item.hidden().iter().any(|s| inc_hidden.contains(s)))
        });
        for displaced in out_inc_hides.chain(out_hides_inc) {
            for s in displaced.hidden().intersection(&locked) {
                hidden_locked_outgoing.insert(*s);
            }
        }
        for s in hidden_locked_incoming.symmetric_difference(&hidden_locked_outgoing) {
            conflicts.insert(*s);
        }
        conflicts
    }
}
