//! Three-layer composition.
//!
//! Real state (derived from the live character), virtual state (persisted
//! user overrides), and preview state (ephemeral hover overrides) layer
//! together into the final equipment, color, and idle-animation outputs.
//! Virtual slots are kept conflict-free: placing an item removes any
//! occupant whose slot it hides. Real item and kit data can contradict each
//! other; the composed output accounts for that instead.

use std::collections::BTreeMap;

use vestiary_domain::catalog::{ItemCatalog, DEFAULT_IDLE_ANIMATION};
use vestiary_domain::color::{ColorChannel, CHANNEL_COUNT};
use vestiary_domain::fallbacks::fallback_kit_id;
use vestiary_domain::gender::Gender;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::ids::{KitId, ITEM_OFFSET, KIT_OFFSET};
use vestiary_domain::kit::{icon_from_item_id, BootsKit, JawKit};
use vestiary_domain::slot::{Slot, SLOT_COUNT};

use crate::diff::Diff;
use crate::model_info::{LayerKind, ModelInfo};
use crate::slot_info::SlotInfo;

/// Owns the three model layers and all precedence logic.
#[derive(Debug, Clone)]
pub struct Layers {
    real_models: ModelInfo,
    virtual_models: ModelInfo,
    preview_models: ModelInfo,
    gender: Option<Gender>,
    last_equipment: Option<[i32; SLOT_COUNT]>,
    last_real_idle_animation: Option<i32>,
}

impl Default for Layers {
    fn default() -> Self {
        Self::new()
    }
}

impl Layers {
    pub fn new() -> Self {
        Self {
            real_models: ModelInfo::new(LayerKind::Real),
            virtual_models: ModelInfo::new(LayerKind::Virtual),
            preview_models: ModelInfo::new(LayerKind::Preview),
            gender: None,
            last_equipment: None,
            last_real_idle_animation: None,
        }
    }

    pub fn real_models(&self) -> &ModelInfo {
        &self.real_models
    }

    pub fn real_models_mut(&mut self) -> &mut ModelInfo {
        &mut self.real_models
    }

    pub fn virtual_models(&self) -> &ModelInfo {
        &self.virtual_models
    }

    pub fn virtual_models_mut(&mut self) -> &mut ModelInfo {
        &mut self.virtual_models
    }

    pub fn preview_models(&self) -> &ModelInfo {
        &self.preview_models
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Clears all state derived from the live character. Called on logout.
    pub fn reset_real(&mut self) {
        self.real_models.reset();
        self.gender = None;
        self.last_equipment = None;
    }

    /// Drops the preview layer, usually because a hover ended.
    pub fn reset_preview(&mut self) {
        self.preview_models.reset();
    }

    pub fn reset_virtual(&mut self) {
        self.virtual_models.reset();
    }

    /// Ingests the non-equipment parts of a live composition: body type,
    /// colors, and the character's current idle animation.
    pub fn derive_non_equipment(&mut self, gender_code: i32, colors: &[i32; CHANNEL_COUNT], idle_animation: i32) {
        let gender = Gender::from_code(gender_code);
        if gender != self.gender {
            self.gender = gender;
            if let Some(gender) = gender {
                self.refresh_gendered_kits(gender);
            }
        }
        self.last_real_idle_animation = Some(idle_animation);
        for channel in ColorChannel::ALL {
            self.real_models
                .colors_mut()
                .put(channel, Some(colors[channel.index()]));
        }
    }

    fn refresh_gendered_kits(&mut self, gender: Gender) {
        self.real_models.kits_mut().set_gender(gender, true);
        self.virtual_models.kits_mut().set_gender(gender, false);
        self.preview_models.kits_mut().set_gender(gender, false);
    }

    /// Ingests a live equipment array into the real layer, replacing its
    /// items. Jaw items are split into kit + icon; the engine never stores
    /// items in the jaw slot. Returns the slots whose real kit became known.
    ///
    /// A repeat of the last-seen array is a no-op.
    pub fn derive_equipment(
        &mut self,
        equipment: &[i32; SLOT_COUNT],
        catalog: &ItemCatalog,
    ) -> Vec<Slot> {
        if self.last_equipment.as_ref() == Some(equipment) {
            return Vec::new();
        }
        self.last_equipment = Some(*equipment);
        self.real_models.items_mut().clear();
        let mut learned = Vec::new();
        for slot in Slot::ALL {
            let equip_id = equipment[slot.index()];
            if equip_id >= ITEM_OFFSET {
                let item_id = equip_id - ITEM_OFFSET;
                if slot == Slot::Jaw {
                    let kit = JawKit::from_equipment_id(equip_id);
                    if let (Some(kit), Some(gender)) = (kit, self.gender) {
                        if kit != JawKit::NoJaw {
                            let kit_id = kit.kit_id(gender);
                            self.real_models.kits_mut().put(slot, kit_id);
                        }
                    }
                    self.real_models
                        .put_icon(Some(icon_from_item_id(item_id.into())));
                } else {
                    let info = SlotInfo::look_up(equip_id, slot, catalog);
                    self.real_models.items_mut().put(slot, Some(info));
                }
            } else if equip_id >= KIT_OFFSET {
                self.real_models
                    .kits_mut()
                    .put(slot, Some(KitId(equip_id - KIT_OFFSET)));
                learned.push(slot);
            }
            // "nothing" is never stored in the real layer; unset means the same
        }
        tracing::debug!(?learned, "derived real equipment");
        learned
    }

    /// Places `info` in `slot` of the virtual layer (or the preview layer if
    /// `is_preview`), or unsets the slot if `info` is `None`. Returns the
    /// diff of everything removed and added.
    ///
    /// Jaw items are not supported here; set icons directly and use jaw kits.
    pub fn set(&mut self, slot: Slot, info: Option<SlotInfo>, is_preview: bool) -> Diff {
        let mut out_slots: BTreeMap<Slot, SlotInfo> = BTreeMap::new();
        let mut in_slots: BTreeMap<Slot, SlotInfo> = BTreeMap::new();
        let models = if is_preview {
            &mut self.preview_models
        } else {
            &mut self.virtual_models
        };
        let old_kit;
        let old_item;
        match info {
            None => {
                // unsetting only requires removing the current occupant
                old_kit = models.kits_mut().remove(slot);
                old_item = models.items_mut().remove(slot);
            }
            Some(info) => {
                in_slots.insert(slot, info.clone());
                if info.is_kit() {
                    old_kit = models.kits_mut().put(slot, info.kit_id());
                    old_item = models.items_mut().remove(slot);
                } else {
                    old_item = models.items_mut().put(slot, Some(info.clone()));
                    old_kit = models.kits_mut().remove(slot);
                }
                let mut removals: Vec<Slot> = Vec::new();
                // occupants of slots the incoming item hides must go
                for hidden in info.hidden() {
                    if models.items().contains(*hidden) || models.kits().contains(*hidden) {
                        removals.push(*hidden);
                    }
                }
                // items elsewhere that hide this slot, or that share hidden
                // slots with the incoming item, must go too
                for (other, existing) in models.items().all() {
                    if *other != slot
                        && (existing.hides(slot)
                            || existing.hidden().iter().any(|s| info.hides(*s)))
                    {
                        removals.push(*other);
                    }
                }
                for removal in removals {
                    if let Some(out_kit) = models.kits_mut().remove(removal) {
                        out_slots.insert(removal, SlotInfo::kit(out_kit, removal));
                    }
                    if let Some(out_item) = models.items_mut().remove(removal) {
                        out_slots.insert(removal, out_item);
                    }
                }
            }
        }
        if let Some(kit_id) = old_kit {
            out_slots.insert(slot, SlotInfo::kit(kit_id, slot));
        }
        if let Some(item) = old_item {
            out_slots.insert(slot, item);
        }
        Diff::of_slots(out_slots, in_slots)
    }

    pub fn set_icon(&mut self, icon: Option<JawIcon>, is_preview: bool) -> Diff {
        let models = if is_preview {
            &mut self.preview_models
        } else {
            &mut self.virtual_models
        };
        let out_icon = models.put_icon(icon);
        Diff::of_icon(out_icon, icon)
    }

    pub fn set_color(&mut self, channel: ColorChannel, color_id: Option<i32>, is_preview: bool) -> Diff {
        let models = if is_preview {
            &mut self.preview_models
        } else {
            &mut self.virtual_models
        };
        let out_id = models.colors_mut().put(channel, color_id);
        Diff::of_color(channel, out_id, color_id)
    }

    /// Composes the final equipment id array. Precedence, highest first:
    /// real hard overrides (vehicle mounts, animation-locking equipment) >
    /// preview items > preview kits > virtual items > virtual kits > real
    /// items > real kits > fallbacks. With `real_only`, the preview and
    /// virtual layers are skipped.
    pub fn compute_equipment(&self, catalog: &ItemCatalog, real_only: bool) -> [i32; SLOT_COUNT] {
        let mut slot_to_id: BTreeMap<Slot, i32> = BTreeMap::new();

        let real_items = self.real_models.items();
        let real_kits = self.real_models.kits();

        // real temporary equipment overrides outrank everything, because the
        // user cannot override the in-game mechanic they reflect
        if let Some(boots) = real_kits.get(Slot::Boots) {
            let is_minecart = [Gender::Masculine, Gender::Feminine]
                .iter()
                .any(|g| BootsKit::Minecart.kit_id(*g) == Some(boots));
            if is_minecart {
                put_all_if_all_absent(
                    &mut slot_to_id,
                    [(Slot::Boots, boots.encoded()), (Slot::Weapon, 0), (Slot::Shield, 0)],
                );
            }
        }
        let weapon_info = real_items.get(Slot::Weapon);
        if let Some(weapon) = weapon_info {
            if weapon
                .item_id()
                .is_some_and(|id| catalog.disables_animation_weapon(id))
            {
                put_all_if_all_absent(
                    &mut slot_to_id,
                    [(Slot::Weapon, weapon.equipment_id()), (Slot::Shield, 0)],
                );
            }
        }
        let shield_info = real_items.get(Slot::Shield);
        let combo = |info: Option<&SlotInfo>| {
            info.and_then(SlotInfo::item_id)
                .is_some_and(|id| catalog.disables_animation_weapon_shield(id))
        };
        if combo(weapon_info) || combo(shield_info) {
            put_all_if_all_absent(
                &mut slot_to_id,
                [
                    (Slot::Weapon, weapon_info.map_or(0, SlotInfo::equipment_id)),
                    (Slot::Shield, shield_info.map_or(0, SlotInfo::equipment_id)),
                ],
            );
        }

        if !real_only {
            self.compute_from_models(&self.preview_models, &mut slot_to_id, false);
            self.compute_from_models(&self.virtual_models, &mut slot_to_id, false);
        }
        self.compute_from_models(&self.real_models, &mut slot_to_id, real_only);

        // if the jaw slot ended up empty but an icon should display, the
        // icon rides on a bare (or fallback) jaw kit
        let current_jaw = slot_to_id.get(&Slot::Jaw).copied();
        let icon = self.displayed_icon(real_only);
        if (current_jaw.is_none() || current_jaw == Some(0))
            && icon.is_some_and(|i| i != JawIcon::Nothing)
        {
            let mut kit = JawKit::NoJaw;
            if current_jaw.is_none() {
                let kit_id = fallback_kit_id(Slot::Jaw, self.gender);
                if let Some(fallback) = JawKit::from_kit_id(kit_id) {
                    kit = fallback;
                }
            }
            if let Some(item_id) = icon.and_then(|i| kit.icon_item(i)) {
                slot_to_id.insert(Slot::Jaw, item_id.encoded());
            }
        }

        let mut ids = [0; SLOT_COUNT];
        for slot in Slot::ALL {
            let equip_id = slot_to_id.get(&slot).copied().unwrap_or_else(|| {
                // encodes to 0 when the slot has no fallback
                fallback_kit_id(slot, self.gender).encoded()
            });
            ids[slot.index()] = equip_id;
        }
        ids
    }

    fn compute_from_models(
        &self,
        models: &ModelInfo,
        slot_to_id: &mut BTreeMap<Slot, i32>,
        real_only: bool,
    ) {
        for info in models.items().all().values() {
            put_all_if_all_absent(slot_to_id, info.compute_equipment());
        }
        for (slot, id) in models.kits().compute_equipment(self.displayed_icon(real_only)) {
            slot_to_id.entry(slot).or_insert(id);
        }
    }

    fn displayed_icon(&self, real_only: bool) -> Option<JawIcon> {
        if !real_only {
            if let Some(icon) = self.preview_models.icon() {
                return Some(icon);
            }
            if let Some(icon) = self.virtual_models.icon() {
                return Some(icon);
            }
        }
        self.real_models.icon()
    }

    /// Composes the final color id array with preview > virtual > real
    /// precedence per channel.
    pub fn compute_colors(&self, real_only: bool) -> [i32; CHANNEL_COUNT] {
        let mut result = [0; CHANNEL_COUNT];
        for channel in ColorChannel::ALL {
            let mut value = None;
            if !real_only {
                value = self
                    .preview_models
                    .colors()
                    .get(channel)
                    .or_else(|| self.virtual_models.colors().get(channel));
            }
            if let Some(id) = value.or_else(|| self.real_models.colors().get(channel)) {
                result[channel.index()] = id;
            }
        }
        result
    }

    /// Determines the idle pose animation, or `None` when it cannot be
    /// determined and should be left unchanged. A real weapon that disables
    /// animations always wins; otherwise preview/virtual weapons take their
    /// table animation, and a real weapon hidden by an override falls back
    /// to the universal default.
    pub fn compute_idle_animation(&self, catalog: &ItemCatalog, real_only: bool) -> Option<i32> {
        let real_weapon = self.real_models.items().get(Slot::Weapon);
        if real_weapon
            .and_then(SlotInfo::item_id)
            .is_some_and(|id| catalog.disables_animation_weapon(id))
        {
            return None;
        }
        if !real_only {
            let weapon = self
                .preview_models
                .items()
                .get(Slot::Weapon)
                .or_else(|| self.virtual_models.items().get(Slot::Weapon));
            if let Some(weapon) = weapon {
                let idle = weapon.item_id().and_then(|id| catalog.idle_animation_for(id));
                return Some(idle.unwrap_or(DEFAULT_IDLE_ANIMATION));
            }
            // an override hiding the real weapon reverts to the default pose
            if real_weapon.is_some_and(|w| {
                w.hidden().iter().any(|slot| {
                    self.virtual_models.contains(*slot) || self.preview_models.contains(*slot)
                })
            }) {
                return Some(DEFAULT_IDLE_ANIMATION);
            }
        }
        match real_weapon {
            Some(weapon) => {
                if let Some(idle) = weapon.item_id().and_then(|id| catalog.idle_animation_for(id)) {
                    return Some(idle);
                }
            }
            None => return Some(DEFAULT_IDLE_ANIMATION),
        }
        self.last_real_idle_animation
    }

    /// Repopulates the virtual layer from persisted state. History is not
    /// touched.
    pub fn restore(
        &mut self,
        slots: BTreeMap<Slot, SlotInfo>,
        colors: BTreeMap<ColorChannel, i32>,
        icon: Option<JawIcon>,
    ) {
        self.virtual_models.reset();
        for (slot, info) in slots {
            if info.is_kit() {
                self.virtual_models.kits_mut().put(slot, info.kit_id());
            } else {
                self.virtual_models.items_mut().put(slot, Some(info));
            }
        }
        self.virtual_models.put_icon(icon);
        self.virtual_models.colors_mut().put_all(colors);
    }

    /// Repopulates real kits remembered for this account.
    pub fn restore_real_kits(&mut self, kits: BTreeMap<Slot, KitId>) {
        for (slot, kit_id) in kits {
            self.real_models.kits_mut().put(slot, Some(kit_id));
        }
    }
}

/// Inserts the batch only if none of its keys are already decided. Override
/// rules are first-writer-wins and all-or-nothing per occupant.
fn put_all_if_all_absent(
    map: &mut BTreeMap<Slot, i32>,
    entries: impl IntoIterator<Item = (Slot, i32)>,
) {
    let entries: Vec<(Slot, i32)> = entries.into_iter().collect();
    if entries.iter().any(|(slot, _)| map.contains_key(slot)) {
        return;
    }
    map.extend(entries);
}
