//! Random outfit generation.
//!
//! Fills every unlocked slot, color, and the icon with random picks from
//! the catalog and kit tables, screened through the lock conflict check,
//! and folds the whole shuffle into one diff so it undoes as a single step.
//! The RNG is injected by the caller.

use rand::seq::SliceRandom;
use rand::Rng;

use vestiary_domain::catalog::ItemCatalog;
use vestiary_domain::color::ColorChannel;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::slot::Slot;

use crate::diff::Diff;
use crate::layers::Layers;
use crate::locks::Locks;
use crate::slot_info::SlotInfo;

// plausible color id ranges per channel, matching the size of the original
// swatch tables
fn color_id_bound(channel: ColorChannel) -> i32 {
    match channel {
        ColorChannel::Hair => 25,
        ColorChannel::Torso | ColorChannel::Legs => 29,
        ColorChannel::Boots => 6,
        ColorChannel::Skin => 8,
    }
}

/// Randomizes all unlocked state in the virtual layer. Returns one merged
/// diff for history.
pub fn shuffle(
    layers: &mut Layers,
    locks: &Locks,
    catalog: &ItemCatalog,
    rng: &mut impl Rng,
) -> Diff {
    let mut diff = Diff::empty();

    // item slots first, in random order so no slot systematically starves
    // when hide sets overlap
    let mut item_slots: Vec<Slot> = Slot::ALL
        .into_iter()
        .filter(|slot| !slot.is_kit_only())
        .collect();
    item_slots.shuffle(rng);
    let mut placed: Vec<SlotInfo> = Vec::new();
    for slot in item_slots {
        if locks.contains(slot) {
            continue;
        }
        // skip slots an already-placed item claims, e.g. the shield slot
        // after a two-handed weapon
        if placed.iter().any(|info| info.hides(slot)) {
            continue;
        }
        let candidates = catalog.items_in_slot(slot);
        let Some(item_id) = candidates.choose(rng).copied() else {
            continue;
        };
        let info = SlotInfo::item(item_id, slot, catalog.hidden_slots(item_id));
        if info.hidden().iter().any(|s| locks.contains(*s)) {
            continue;
        }
        if locks.is_allowed(slot, Some(&info), layers) {
            placed.push(info.clone());
            diff = Diff::merge(layers.set(slot, Some(info), false), diff);
        }
    }

    // kit slots that no placed item hides, for the known body type
    if let Some(gender) = layers.gender() {
        for slot in [Slot::Hair, Slot::Jaw, Slot::Arms] {
            if locks.contains(slot) || placed.iter().any(|info| info.hides(slot)) {
                continue;
            }
            let kits: Vec<_> = vestiary_domain::kit::kits_in_slot(slot)
                .into_iter()
                .filter_map(|kit| kit.kit_id(gender))
                .filter(|kit_id| kit_id.get() >= 0)
                .collect();
            let Some(kit_id) = kits.choose(rng).copied() else {
                continue;
            };
            let info = SlotInfo::kit(kit_id, slot);
            if locks.is_allowed(slot, Some(&info), layers) {
                diff = Diff::merge(layers.set(slot, Some(info), false), diff);
            }
        }
    }

    for channel in ColorChannel::ALL {
        if locks.color_locked(channel) {
            continue;
        }
        let color_id = rng.gen_range(0..color_id_bound(channel));
        diff = Diff::merge(layers.set_color(channel, Some(color_id), false), diff);
    }

    if !locks.icon_locked() {
        let icon = JawIcon::ALL.choose(rng).copied().unwrap_or(JawIcon::Nothing);
        diff = Diff::merge(layers.set_icon(Some(icon), false), diff);
    }

    tracing::debug!("shuffled unlocked appearance state");
    diff
}
