//! The caller-facing entry point.
//!
//! `Wardrobe` wires the layers, locks, history, and catalog together and is
//! what a UI or importer talks to. Every user-visible operation goes through
//! here so that lock screening, history recording, and change notification
//! stay consistent. All methods must be called from the owner's single
//! model thread; the wardrobe holds no internal synchronization.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use vestiary_domain::catalog::ItemCatalog;
use vestiary_domain::color::{ColorChannel, CHANNEL_COUNT};
use vestiary_domain::fallbacks::fallback_kit;
use vestiary_domain::gender::Gender;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::ids::{ItemId, KitId, ITEM_OFFSET, KIT_OFFSET};
use vestiary_domain::kit::{self, icon_from_item_id};
use vestiary_domain::slot::{Slot, SLOT_COUNT};

use crate::config::{SavedLocks, SavedOutfit, SavedRealKits};
use crate::diff::Diff;
use crate::event::{Event, Listener};
use crate::history::History;
use crate::layers::Layers;
use crate::locks::{LockStatus, Locks};
use crate::model_info::LayerKind;
use crate::randomizer;
use crate::slot_info::SlotInfo;

/// A point-in-time copy of the live character record, handed in by the
/// owner whenever the character changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionSnapshot {
    pub equipment: [i32; SLOT_COUNT],
    pub colors: [i32; CHANNEL_COUNT],
    pub gender_code: i32,
    pub idle_animation: i32,
}

/// Coordinates layers, locks, history, and the item catalog.
pub struct Wardrobe {
    layers: Layers,
    locks: Locks,
    history: History,
    catalog: ItemCatalog,
    listeners: Vec<Listener>,
}

impl Default for Wardrobe {
    fn default() -> Self {
        Self::new(ItemCatalog::new())
    }
}

impl Wardrobe {
    pub fn new(catalog: ItemCatalog) -> Self {
        Self {
            layers: Layers::new(),
            locks: Locks::new(),
            history: History::new(),
            catalog,
            listeners: Vec::new(),
        }
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    pub fn locks(&self) -> &Locks {
        &self.locks
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut ItemCatalog {
        &mut self.catalog
    }

    /// Registers a change listener for the lifetime of this wardrobe.
    pub fn add_listener(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn emit(&mut self, event: Event) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn emit_diff(&mut self, diff: &Diff, layer: LayerKind) {
        let events: Vec<Event> = diff
            .in_slots()
            .iter()
            .map(|(slot, info)| slot_event(*slot, Some(info), layer))
            .chain(
                diff.out_slots()
                    .iter()
                    .filter(|(slot, _)| !diff.in_slots().contains_key(slot))
                    .map(|(slot, info)| removal_event(*slot, info, layer)),
            )
            .collect();
        for event in events {
            self.emit(event);
        }
        let color_events: Vec<Event> = diff
            .in_colors()
            .iter()
            .map(|(channel, id)| Event::ColorChanged {
                channel: *channel,
                layer,
                color_id: Some(*id),
            })
            .chain(
                diff.out_colors()
                    .iter()
                    .filter(|(channel, _)| !diff.in_colors().contains_key(channel))
                    .map(|(channel, _)| Event::ColorChanged {
                        channel: *channel,
                        layer,
                        color_id: None,
                    }),
            )
            .collect();
        for event in color_events {
            self.emit(event);
        }
        if diff.out_icon() != diff.in_icon() {
            self.emit(Event::IconChanged {
                layer,
                icon: diff.in_icon(),
            });
        }
    }

    fn emit_history_changed(&mut self) {
        let event = Event::HistoryChanged {
            undo_size: self.history.undo_size(),
            redo_size: self.history.redo_size(),
        };
        self.emit(event);
    }

    // --- derive / compute ---------------------------------------------------

    /// Ingests a fresh composition snapshot into the real layer.
    pub fn derive(&mut self, snapshot: &CompositionSnapshot) {
        self.layers.derive_non_equipment(
            snapshot.gender_code,
            &snapshot.colors,
            snapshot.idle_animation,
        );
        let learned = self.layers.derive_equipment(&snapshot.equipment, &self.catalog);
        for slot in learned {
            self.emit(Event::KnownKitChanged { slot });
        }
    }

    /// Clears everything derived from the live character. Called on logout.
    pub fn reset_real(&mut self) {
        self.layers.reset_real();
    }

    pub fn compute_equipment(&self) -> [i32; SLOT_COUNT] {
        self.layers.compute_equipment(&self.catalog, false)
    }

    pub fn compute_colors(&self) -> [i32; CHANNEL_COUNT] {
        self.layers.compute_colors(false)
    }

    pub fn compute_idle_animation(&self) -> Option<i32> {
        self.layers.compute_idle_animation(&self.catalog, false)
    }

    /// Real-only outputs, used to put the character back to its true state
    /// on shutdown without clearing virtual state.
    pub fn compute_real_equipment(&self) -> [i32; SLOT_COUNT] {
        self.layers.compute_equipment(&self.catalog, true)
    }

    pub fn compute_real_colors(&self) -> [i32; CHANNEL_COUNT] {
        self.layers.compute_colors(true)
    }

    pub fn compute_real_idle_animation(&self) -> Option<i32> {
        self.layers.compute_idle_animation(&self.catalog, true)
    }

    // --- lock surface -------------------------------------------------------

    pub fn is_slot_locked(&self, slot: Slot) -> bool {
        self.locks.contains(slot)
    }

    pub fn is_kit_locked(&self, slot: Slot) -> bool {
        self.locks.get(slot) == Some(LockStatus::All)
    }

    pub fn is_color_locked(&self, channel: ColorChannel) -> bool {
        self.locks.color_locked(channel)
    }

    pub fn is_icon_locked(&self) -> bool {
        self.locks.icon_locked()
    }

    pub fn toggle_item_lock(&mut self, slot: Slot) {
        self.locks.toggle(slot, LockStatus::Item);
        let status = self.locks.get(slot);
        self.emit(Event::LockChanged { slot, status });
    }

    pub fn toggle_kit_lock(&mut self, slot: Slot) {
        self.locks.toggle(slot, LockStatus::All);
        let status = self.locks.get(slot);
        self.emit(Event::LockChanged { slot, status });
    }

    pub fn toggle_color_lock(&mut self, channel: ColorChannel) {
        self.locks.toggle_color(channel);
        let locked = self.locks.color_locked(channel);
        self.emit(Event::ColorLockChanged { channel, locked });
    }

    pub fn toggle_icon_lock(&mut self) {
        self.locks.toggle_icon();
        let locked = self.locks.icon_locked();
        self.emit(Event::IconLockChanged { locked });
    }

    // --- virtual state queries ----------------------------------------------

    pub fn virtual_item_id(&self, slot: Slot) -> Option<ItemId> {
        self.layers
            .virtual_models()
            .items()
            .get(slot)
            .and_then(SlotInfo::item_id)
    }

    pub fn virtual_kit_id(&self, slot: Slot) -> Option<KitId> {
        self.layers.virtual_models().kits().get(slot)
    }

    pub fn virtual_color_id(&self, channel: ColorChannel) -> Option<i32> {
        self.layers.virtual_models().colors().get(channel)
    }

    pub fn virtual_icon(&self) -> Option<JawIcon> {
        self.layers.virtual_models().icon()
    }

    /// Whether the slot holds an explicit virtual "nothing".
    pub fn is_nothing(&self, slot: Slot) -> bool {
        self.layers
            .virtual_models()
            .items()
            .get(slot)
            .is_some_and(SlotInfo::is_nothing)
    }

    // --- hover (preview layer) ----------------------------------------------

    /// Previews an item (or explicit nothing) without committing it.
    pub fn hover_item(&mut self, slot: Slot, item_id: Option<ItemId>) {
        let info = match item_id {
            Some(id) => SlotInfo::look_up(id.encoded(), slot, &self.catalog),
            None => SlotInfo::nothing(slot),
        };
        if self.locks.is_allowed(slot, Some(&info), &self.layers) {
            let diff = self.layers.set(slot, Some(info), true);
            self.emit_diff(&diff, LayerKind::Preview);
        }
    }

    pub fn hover_kit(&mut self, slot: Slot, kit_id: KitId) {
        if self.is_kit_locked(slot) {
            return;
        }
        let info = SlotInfo::kit(kit_id, slot);
        let diff = self.layers.set(slot, Some(info), true);
        self.emit_diff(&diff, LayerKind::Preview);
    }

    pub fn hover_color(&mut self, channel: ColorChannel, color_id: i32) {
        if self.locks.color_locked(channel) {
            return;
        }
        let diff = self.layers.set_color(channel, Some(color_id), true);
        self.emit_diff(&diff, LayerKind::Preview);
    }

    pub fn hover_icon(&mut self, icon: JawIcon) {
        if self.locks.icon_locked() {
            return;
        }
        let diff = self.layers.set_icon(Some(icon), true);
        self.emit_diff(&diff, LayerKind::Preview);
    }

    /// Drops the preview layer when a hover ends.
    pub fn hover_away(&mut self) {
        self.layers.reset_preview();
    }

    // --- select (virtual layer) ---------------------------------------------

    /// Commits an item (or explicit nothing) to the virtual layer.
    /// Re-selecting the current occupant clears the slot instead.
    pub fn select_item(&mut self, slot: Slot, item_id: Option<ItemId>) {
        let info = match item_id {
            Some(id) => SlotInfo::look_up(id.encoded(), slot, &self.catalog),
            None => SlotInfo::nothing(slot),
        };
        if !self.locks.is_allowed(slot, Some(&info), &self.layers) {
            return;
        }
        self.layers.reset_preview();
        let existing = self.layers.virtual_models().items().get(slot);
        let final_info = if existing == Some(&info) { None } else { Some(info) };
        let diff = self.layers.set(slot, final_info, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    pub fn select_kit(&mut self, slot: Slot, kit_id: KitId) {
        let info = SlotInfo::kit(kit_id, slot);
        if !self.locks.is_allowed(slot, Some(&info), &self.layers) {
            return;
        }
        self.layers.reset_preview();
        let existing = self.layers.virtual_models().kits().get(slot);
        let final_info = if existing == Some(kit_id) { None } else { Some(info) };
        let diff = self.layers.set(slot, final_info, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    pub fn select_color(&mut self, channel: ColorChannel, color_id: i32) {
        if self.locks.color_locked(channel) {
            return;
        }
        self.layers.reset_preview();
        let existing = self.layers.virtual_models().colors().get(channel);
        let final_id = if existing == Some(color_id) { None } else { Some(color_id) };
        let diff = self.layers.set_color(channel, final_id, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    pub fn select_icon(&mut self, icon: JawIcon) {
        if self.locks.icon_locked() {
            return;
        }
        self.layers.reset_preview();
        let existing = self.layers.virtual_models().icon();
        let final_icon = if existing == Some(icon) { None } else { Some(icon) };
        let diff = self.layers.set_icon(final_icon, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    /// Forces a kit-only slot to an explicit "nothing", for when slot
    /// metadata failed to load and the user wants the model blanked. On a
    /// slot already blanked, reverts to unset.
    pub fn override_kit_with_nothing(&mut self, slot: Slot) {
        if !slot.allows_nothing_kit() {
            return;
        }
        let already_nothing = self.is_nothing(slot);
        let info = if already_nothing { None } else { Some(SlotInfo::nothing(slot)) };
        let diff = self.layers.set(slot, info, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    // --- revert / clear -----------------------------------------------------

    /// Unlocks and unsets one slot.
    pub fn revert_slot(&mut self, slot: Slot) {
        self.locks.set(slot, None);
        self.emit(Event::LockChanged { slot, status: None });
        let diff = self.layers.set(slot, None, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    pub fn revert_color(&mut self, channel: ColorChannel) {
        self.locks.set_color(channel, false);
        self.emit(Event::ColorLockChanged { channel, locked: false });
        let diff = self.layers.set_color(channel, None, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    pub fn revert_icon(&mut self) {
        self.locks.set_icon(false);
        self.emit(Event::IconLockChanged { locked: false });
        let diff = self.layers.set_icon(None, false);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    /// Reverts all virtual slots, colors, and the icon as one history
    /// entry. Locked state stays put unless `remove_locks`.
    pub fn clear(&mut self, remove_locks: bool) {
        if remove_locks {
            self.locks.clear();
        }
        let mut diff = Diff::empty();
        for slot in Slot::ALL {
            if self.locks.is_allowed(slot, None, &self.layers) {
                diff = Diff::merge(self.layers.set(slot, None, false), diff);
            }
        }
        for channel in ColorChannel::ALL {
            if !self.locks.color_locked(channel) {
                diff = Diff::merge(self.layers.set_color(channel, None, false), diff);
            }
        }
        if !self.locks.icon_locked() {
            diff = Diff::merge(self.layers.set_icon(None, false), diff);
        }
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    // --- history ------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.undo_size() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.redo_size() > 0
    }

    pub fn undo(&mut self) {
        let Self {
            layers,
            locks,
            history,
            ..
        } = self;
        if history.undo(|diff| restore_diff(layers, locks, diff)) {
            self.emit_history_changed();
        }
    }

    pub fn redo(&mut self) {
        let Self {
            layers,
            locks,
            history,
            ..
        } = self;
        if history.redo(|diff| restore_diff(layers, locks, diff)) {
            self.emit_history_changed();
        }
    }

    // --- import / export ----------------------------------------------------

    /// Loads another character's full composition into the virtual layer as
    /// one history entry. Locked slots, colors, and icon are skipped; the
    /// jaw slot's item id is converted to its icon.
    pub fn import_outfit(&mut self, equipment: &[i32; SLOT_COUNT], colors: &[i32; CHANNEL_COUNT]) {
        let mut items: BTreeMap<Slot, ItemId> = BTreeMap::new();
        let mut kits: BTreeMap<Slot, KitId> = BTreeMap::new();
        let mut nothing_slots: BTreeSet<Slot> = BTreeSet::new();
        let mut icon: Option<JawIcon> = None;
        for slot in Slot::ALL {
            let equip_id = equipment[slot.index()];
            if equip_id >= ITEM_OFFSET {
                let item_id = ItemId(equip_id - ITEM_OFFSET);
                if slot == Slot::Jaw {
                    icon = Some(icon_from_item_id(item_id));
                } else {
                    items.insert(slot, item_id);
                }
            } else if equip_id >= KIT_OFFSET {
                kits.insert(slot, KitId(equip_id - KIT_OFFSET));
            } else if slot.allows_nothing_item() {
                nothing_slots.insert(slot);
            }
        }

        let mut diff = Diff::empty();
        let mut unset_slots: BTreeSet<Slot> = Slot::ALL.into_iter().collect();

        for (slot, item_id) in items {
            let info = SlotInfo::look_up(item_id.encoded(), slot, &self.catalog);
            if !self.locks.is_allowed(slot, Some(&info), &self.layers) {
                unset_slots.remove(&slot);
                continue;
            }
            let hidden = info.hidden().clone();
            diff = Diff::merge(self.layers.set(slot, Some(info), false), diff);
            unset_slots.remove(&slot);
            for hidden_slot in hidden {
                unset_slots.remove(&hidden_slot);
                nothing_slots.remove(&hidden_slot);
            }
        }

        if !self.locks.icon_locked() {
            diff = Diff::merge(self.layers.set_icon(icon, false), diff);
        }

        match self.layers.gender() {
            Some(gender) => {
                for (slot, kit_id) in kits {
                    let Some(info) = import_kit(slot, kit_id, gender) else {
                        continue;
                    };
                    if !self.locks.is_allowed(slot, Some(&info), &self.layers) {
                        unset_slots.remove(&slot);
                        continue;
                    }
                    diff = Diff::merge(self.layers.set(slot, Some(info), false), diff);
                    unset_slots.remove(&slot);
                }
            }
            None => {
                if !kits.is_empty() {
                    tracing::warn!("skipping kit imports: character body type is unknown");
                }
            }
        }

        for slot in nothing_slots {
            let info = SlotInfo::nothing(slot);
            if !self.locks.is_allowed(slot, Some(&info), &self.layers) {
                unset_slots.remove(&slot);
                continue;
            }
            diff = Diff::merge(self.layers.set(slot, Some(info), false), diff);
            unset_slots.remove(&slot);
        }

        for slot in unset_slots {
            if self.locks.is_allowed(slot, None, &self.layers) {
                diff = Diff::merge(self.layers.set(slot, None, false), diff);
            }
        }

        for channel in ColorChannel::ALL {
            if !self.locks.color_locked(channel) {
                let color = Some(colors[channel.index()]);
                diff = Diff::merge(self.layers.set_color(channel, color, false), diff);
            }
        }

        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }

    /// The virtual layer as its persisted shape, also used for clipboard
    /// export.
    pub fn export_outfit(&self) -> SavedOutfit {
        let models = self.layers.virtual_models();
        let mut slots: BTreeMap<Slot, i32> = models
            .items()
            .all()
            .iter()
            .map(|(slot, info)| (*slot, info.equipment_id()))
            .collect();
        for (slot, kit_id) in models.kits().all() {
            slots.insert(*slot, kit_id.encoded());
        }
        SavedOutfit {
            slots,
            colors: models.colors().all().clone(),
            icon: models.icon().map(JawIcon::id),
        }
    }

    // --- persistence --------------------------------------------------------

    pub fn snapshot_locks(&self) -> SavedLocks {
        SavedLocks {
            slots: self.locks.slots().clone(),
            colors: self.locks.locked_colors().clone(),
            icon: self.locks.icon_locked(),
        }
    }

    pub fn snapshot_real_kits(&self) -> SavedRealKits {
        SavedRealKits {
            kits: self.layers.real_models().kits().all().clone(),
        }
    }

    /// Repopulates the virtual layer from saved state, bypassing locks and
    /// history.
    pub fn restore_outfit(&mut self, outfit: &SavedOutfit) {
        let slots = outfit
            .slots
            .iter()
            .map(|(slot, equip_id)| (*slot, SlotInfo::look_up(*equip_id, *slot, &self.catalog)))
            .collect();
        let icon = outfit.icon.and_then(JawIcon::from_id);
        self.layers.restore(slots, outfit.colors.clone(), icon);
    }

    pub fn restore_locks(&mut self, saved: &SavedLocks) {
        self.locks
            .restore(saved.slots.clone(), saved.colors.clone(), saved.icon);
    }

    pub fn restore_real_kits(&mut self, saved: &SavedRealKits) {
        self.layers.restore_real_kits(saved.kits.clone());
    }

    // --- randomizer ---------------------------------------------------------

    /// Randomizes all unlocked appearance state as one history entry.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        let Self {
            layers,
            locks,
            catalog,
            ..
        } = self;
        let diff = randomizer::shuffle(layers, locks, catalog, rng);
        self.history.append(diff.clone());
        self.emit_diff(&diff, LayerKind::Virtual);
        self.emit_history_changed();
    }
}

/// Re-applies a diff's `out` side where the current lock state permits and
/// returns the inverse diff. Relocking a slot after its change was recorded
/// silently drops that slot from restoration.
fn restore_diff(layers: &mut Layers, locks: &Locks, diff: &Diff) -> Diff {
    let mut result = Diff::empty();
    for slot in Slot::ALL {
        let info = diff.out_slots().get(&slot);
        if info != diff.in_slots().get(&slot) && locks.is_allowed(slot, info, layers) {
            result = Diff::merge(layers.set(slot, info.cloned(), false), result);
        }
    }
    for channel in ColorChannel::ALL {
        let color_id = diff.out_colors().get(&channel).copied();
        if color_id != diff.in_colors().get(&channel).copied() && !locks.color_locked(channel) {
            result = Diff::merge(layers.set_color(channel, color_id, false), result);
        }
    }
    if diff.out_icon() != diff.in_icon() && !locks.icon_locked() {
        result = Diff::merge(layers.set_icon(diff.out_icon(), false), result);
    }
    result
}

/// Resolves an imported kit id for the local body type, falling back to the
/// slot's default kit when no analog exists.
fn import_kit(slot: Slot, kit_id: KitId, gender: Gender) -> Option<SlotInfo> {
    let resolved = kit::with_analog(kit_id, gender)
        .or_else(|| fallback_kit(slot, gender))
        .and_then(|kit| kit.kit_id(gender))?;
    Some(SlotInfo::kit(resolved, slot))
}

fn slot_event(slot: Slot, info: Option<&SlotInfo>, layer: LayerKind) -> Event {
    match info {
        Some(info) if info.is_kit() => Event::KitChanged {
            slot,
            layer,
            kit_id: info.kit_id(),
        },
        _ => Event::ItemChanged {
            slot,
            layer,
            info: info.cloned(),
        },
    }
}

fn removal_event(slot: Slot, removed: &SlotInfo, layer: LayerKind) -> Event {
    if removed.is_kit() {
        Event::KitChanged {
            slot,
            layer,
            kit_id: None,
        }
    } else {
        Event::ItemChanged {
            slot,
            layer,
            info: None,
        }
    }
}
