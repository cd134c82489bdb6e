//! The occupant of a single slot.
//!
//! A slot holds nothing, a base-model kit, or an item. Items additionally
//! carry the set of other slots they force to show nothing while worn. The
//! encoded integer form (0 / kit band / item band) exists only at the
//! compute and derive boundary; inside the engine occupants are explicit.

use std::collections::{BTreeMap, BTreeSet};

use vestiary_domain::catalog::ItemCatalog;
use vestiary_domain::ids::{ItemId, KitId, ITEM_OFFSET, KIT_OFFSET};
use vestiary_domain::slot::Slot;

/// What occupies a slot in one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    /// Explicitly nothing. Distinct from "unset": an explicit nothing blanks
    /// the slot during composition instead of falling through to lower layers.
    Nothing,
    Kit(KitId),
    Item { id: ItemId, hidden: BTreeSet<Slot> },
}

/// One slot's occupant together with the slot it sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    slot: Slot,
    occupant: Occupant,
}

impl SlotInfo {
    pub fn nothing(slot: Slot) -> Self {
        Self {
            slot,
            occupant: Occupant::Nothing,
        }
    }

    pub fn kit(kit_id: KitId, slot: Slot) -> Self {
        Self {
            slot,
            occupant: Occupant::Kit(kit_id),
        }
    }

    pub fn item(item_id: ItemId, slot: Slot, hidden: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            slot,
            occupant: Occupant::Item {
                id: item_id,
                hidden: hidden.into_iter().collect(),
            },
        }
    }

    /// Classifies an encoded occupant id. For items, the hidden slots come
    /// from the catalog; an unknown item simply hides nothing.
    ///
    /// Jaw items must be split into kit + icon before reaching this point.
    pub fn look_up(equipment_id: i32, slot: Slot, catalog: &ItemCatalog) -> Self {
        if equipment_id <= KIT_OFFSET {
            Self::nothing(slot)
        } else if equipment_id <= ITEM_OFFSET {
            Self::kit(KitId(equipment_id - KIT_OFFSET), slot)
        } else {
            let item_id = ItemId(equipment_id - ITEM_OFFSET);
            Self::item(item_id, slot, catalog.hidden_slots(item_id))
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn occupant(&self) -> &Occupant {
        &self.occupant
    }

    pub fn is_item(&self) -> bool {
        matches!(self.occupant, Occupant::Item { .. })
    }

    pub fn is_kit(&self) -> bool {
        matches!(self.occupant, Occupant::Kit(_))
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self.occupant, Occupant::Nothing)
    }

    pub fn item_id(&self) -> Option<ItemId> {
        match &self.occupant {
            Occupant::Item { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn kit_id(&self) -> Option<KitId> {
        match &self.occupant {
            Occupant::Kit(id) => Some(*id),
            _ => None,
        }
    }

    /// Slots forced to show nothing while this occupant is active. Always
    /// empty for kits and nothing.
    pub fn hidden(&self) -> &BTreeSet<Slot> {
        static EMPTY: BTreeSet<Slot> = BTreeSet::new();
        match &self.occupant {
            Occupant::Item { hidden, .. } => hidden,
            _ => &EMPTY,
        }
    }

    pub fn hides(&self, slot: Slot) -> bool {
        self.hidden().contains(&slot)
    }

    /// The single-integer form written into the composed equipment array.
    pub fn equipment_id(&self) -> i32 {
        match &self.occupant {
            Occupant::Nothing => 0,
            Occupant::Kit(id) => id.encoded(),
            Occupant::Item { id, .. } => id.encoded(),
        }
    }

    /// Expands this occupant into its slot assignment plus a zero for every
    /// slot it hides. This is what lets one assignment blank out dependent
    /// slots during composition.
    pub fn compute_equipment(&self) -> BTreeMap<Slot, i32> {
        let mut result = BTreeMap::new();
        result.insert(self.slot, self.equipment_id());
        for hidden in self.hidden() {
            result.insert(*hidden, 0);
        }
        result
    }
}
