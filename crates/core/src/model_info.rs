//! Per-layer model state.
//!
//! Each of the three layers owns one [`ModelInfo`]: an item sub-map, a kit
//! sub-map, a color map, and an optional jaw icon. Kits are stored apart
//! from items because a lower-priority kit may legitimately coexist under an
//! item that obscures it. The item/kit exclusivity invariant within one
//! layer is enforced by `Layers::set`, not here.

use std::collections::BTreeMap;

use vestiary_domain::color::ColorChannel;
use vestiary_domain::gender::Gender;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::ids::KitId;
use vestiary_domain::kit::{self, jaw_equipment_id};
use vestiary_domain::slot::Slot;

use crate::slot_info::SlotInfo;

/// Which of the three layers a piece of model state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Real,
    Virtual,
    Preview,
}

/// Item occupants of a layer, keyed by slot. Explicit "nothing" occupants
/// are stored here too.
#[derive(Debug, Clone, Default)]
pub struct Items {
    value: BTreeMap<Slot, SlotInfo>,
}

impl Items {
    pub fn all(&self) -> &BTreeMap<Slot, SlotInfo> {
        &self.value
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotInfo> {
        self.value.get(&slot)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.value.contains_key(&slot)
    }

    pub fn put(&mut self, slot: Slot, info: Option<SlotInfo>) -> Option<SlotInfo> {
        match info {
            Some(info) => self.value.insert(slot, info),
            None => self.value.remove(&slot),
        }
    }

    pub fn remove(&mut self, slot: Slot) -> Option<SlotInfo> {
        self.put(slot, None)
    }

    pub fn put_all(&mut self, other: BTreeMap<Slot, SlotInfo>) {
        for (slot, info) in other {
            self.put(slot, Some(info));
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Kit occupants of a layer, keyed by slot. "Nothing" is never stored here;
/// the item sub-map handles explicit nothings.
#[derive(Debug, Clone, Default)]
pub struct Kits {
    value: BTreeMap<Slot, KitId>,
}

impl Kits {
    pub fn all(&self) -> &BTreeMap<Slot, KitId> {
        &self.value
    }

    pub fn get(&self, slot: Slot) -> Option<KitId> {
        self.value.get(&slot).copied()
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.value.contains_key(&slot)
    }

    pub fn put(&mut self, slot: Slot, kit_id: Option<KitId>) -> Option<KitId> {
        match kit_id {
            Some(id) => self.value.insert(slot, id),
            None => self.value.remove(&slot),
        }
    }

    pub fn remove(&mut self, slot: Slot) -> Option<KitId> {
        self.put(slot, None)
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Replaces stored kit ids with ones valid for the given body type. If
    /// `destructive`, wrongly-gendered kits are dropped; otherwise each is
    /// swapped for its closest analog where one exists.
    pub fn set_gender(&mut self, gender: Gender, destructive: bool) {
        for slot in Slot::ALL {
            let Some(kit_id) = self.get(slot) else {
                continue;
            };
            let already_valid = kit::kit_for_id(kit_id)
                .is_some_and(|(kit, _)| kit.kit_id(gender) == Some(kit_id));
            if already_valid {
                continue;
            }
            let replacement = if destructive {
                None
            } else {
                kit::with_analog(kit_id, gender).and_then(|kit| kit.kit_id(gender))
            };
            self.put(slot, replacement);
        }
    }

    /// Encoded equipment ids for every stored kit. The jaw slot combines
    /// with the given icon.
    pub fn compute_equipment(&self, icon: Option<JawIcon>) -> BTreeMap<Slot, i32> {
        self.value
            .iter()
            .map(|(slot, kit_id)| {
                let id = if *slot == Slot::Jaw {
                    jaw_equipment_id(*kit_id, icon)
                } else {
                    kit_id.encoded()
                };
                (*slot, id)
            })
            .collect()
    }
}

/// Color overrides of a layer. Values are color ids, not RGB.
#[derive(Debug, Clone, Default)]
pub struct Colors {
    value: BTreeMap<ColorChannel, i32>,
}

impl Colors {
    pub fn all(&self) -> &BTreeMap<ColorChannel, i32> {
        &self.value
    }

    pub fn get(&self, channel: ColorChannel) -> Option<i32> {
        self.value.get(&channel).copied()
    }

    pub fn put(&mut self, channel: ColorChannel, color_id: Option<i32>) -> Option<i32> {
        match color_id {
            Some(id) => self.value.insert(channel, id),
            None => self.value.remove(&channel),
        }
    }

    pub fn put_all(&mut self, other: BTreeMap<ColorChannel, i32>) {
        self.value.extend(other);
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// All model state scoped to one layer.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    kind: LayerKind,
    items: Items,
    kits: Kits,
    colors: Colors,
    icon: Option<JawIcon>,
}

impl ModelInfo {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            items: Items::default(),
            kits: Kits::default(),
            colors: Colors::default(),
            icon: None,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Items {
        &mut self.items
    }

    pub fn kits(&self) -> &Kits {
        &self.kits
    }

    pub fn kits_mut(&mut self) -> &mut Kits {
        &mut self.kits
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut Colors {
        &mut self.colors
    }

    pub fn icon(&self) -> Option<JawIcon> {
        self.icon
    }

    pub fn put_icon(&mut self, icon: Option<JawIcon>) -> Option<JawIcon> {
        std::mem::replace(&mut self.icon, icon)
    }

    /// Whether the slot is occupied in this layer by either an item or a kit.
    pub fn contains(&self, slot: Slot) -> bool {
        self.items.contains(slot) || self.kits.contains(slot)
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.kits.clear();
        self.colors.clear();
        self.icon = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vestiary_domain::kit::{ArmsKit, LegsKit};

    #[test]
    fn test_contains_items_or_kits() {
        let mut models = ModelInfo::new(LayerKind::Virtual);
        assert!(!models.contains(Slot::Torso));
        models.kits_mut().put(Slot::Torso, Some(KitId(18)));
        assert!(models.contains(Slot::Torso));
        models.kits_mut().remove(Slot::Torso);
        models
            .items_mut()
            .put(Slot::Torso, Some(SlotInfo::nothing(Slot::Torso)));
        assert!(models.contains(Slot::Torso));
    }

    #[test]
    fn test_set_gender_replaces_with_analog() {
        let mut kits = Kits::default();
        let regular = ArmsKit::Regular.kit_id(Gender::Masculine).unwrap();
        kits.put(Slot::Arms, Some(regular));
        kits.set_gender(Gender::Feminine, false);
        assert_eq!(
            kits.get(Slot::Arms),
            ArmsKit::ShortSleeves.kit_id(Gender::Feminine)
        );
    }

    #[test]
    fn test_set_gender_destructive_drops() {
        let mut kits = Kits::default();
        let shorts = LegsKit::Shorts.kit_id(Gender::Masculine).unwrap();
        kits.put(Slot::Legs, Some(shorts));
        kits.set_gender(Gender::Feminine, true);
        assert_eq!(kits.get(Slot::Legs), None);
    }

    #[test]
    fn test_set_gender_keeps_valid_kits() {
        let mut kits = Kits::default();
        let plain = LegsKit::Plain.kit_id(Gender::Masculine).unwrap();
        kits.put(Slot::Legs, Some(plain));
        kits.set_gender(Gender::Masculine, false);
        assert_eq!(kits.get(Slot::Legs), Some(plain));
    }
}
