//! Lock conflict scenarios. A lock must hold against direct changes and
//! against hide-relationship side effects: un-hiding a locked slot is just
//! as much a change as writing to it.

use std::collections::BTreeSet;

use vestiary_domain::ids::KitId;
use vestiary_domain::slot::Slot;

use crate::layers::Layers;
use crate::locks::{LockStatus, Locks};
use crate::slot_info::SlotInfo;

use super::fixtures::*;

fn assert_allowed(locks: &Locks, slot: Slot, info: Option<&SlotInfo>, layers: &Layers) {
    assert_eq!(
        locks.conflicting_slots(slot, info, layers),
        BTreeSet::new()
    );
}

#[test]
fn test_allow_unlocked_slot() {
    let catalog = catalog();
    let layers = masc_layers();
    let locks = Locks::new();
    assert_allowed(&locks, Slot::Head, Some(&item(RED_PARTY_HAT, &catalog)), &layers);
    assert_allowed(&locks, Slot::Head, None, &layers);
}

#[test]
fn test_allow_kit_change_under_item_lock() {
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Torso, Some(LockStatus::Item));
    let shirt = SlotInfo::kit(KitId(22), Slot::Torso);
    assert_allowed(&locks, Slot::Torso, Some(&shirt), &layers);
}

#[test]
fn test_allow_unrelated_slot_next_to_locks() {
    let catalog = catalog();
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Head, Some(LockStatus::All));
    locks.set(Slot::Shield, Some(LockStatus::All));
    assert_allowed(&locks, Slot::Amulet, Some(&item(CAMULET, &catalog)), &layers);
}

#[test]
fn test_allow_swapping_helms_that_hide_the_same_locked_slot() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Head, Some(item(RUNE_MED_HELM, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Hair, Some(LockStatus::All));
    // hair is hidden before and after, so its lock is not disturbed
    assert_allowed(&locks, Slot::Head, Some(&item(IRON_FULL_HELM, &catalog)), &layers);
}

#[test]
fn test_allow_removing_item_unrelated_to_locked_slot() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Cape, Some(item(BLUE_CAPE, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Hair, Some(LockStatus::All));
    assert_allowed(&locks, Slot::Cape, None, &layers);
}

#[test]
fn test_allow_weapon_swap_with_locked_shield_when_neither_hides() {
    let catalog = catalog();
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Shield, Some(LockStatus::All));
    assert_allowed(&locks, Slot::Weapon, Some(&item(BLACK_MACE, &catalog)), &layers);
}

#[test]
fn test_allow_displacement_that_keeps_locked_slot_hidden() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Torso, Some(item(PLAGUE_JACKET, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Hands, Some(LockStatus::All));
    // the gloves displace the jacket, but both hide the locked hands slot
    assert_allowed(&locks, Slot::Weapon, Some(&item(BOXING_GLOVES, &catalog)), &layers);
}

#[test]
fn test_allow_nothing_in_unlocked_slot() {
    let layers = masc_layers();
    let locks = Locks::new();
    assert_allowed(&locks, Slot::Cape, Some(&SlotInfo::nothing(Slot::Cape)), &layers);
}

#[test]
fn test_disallow_item_change_in_all_locked_slot() {
    let catalog = catalog();
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Head, Some(LockStatus::All));
    let conflicts =
        locks.conflicting_slots(Slot::Head, Some(&item(RED_PARTY_HAT, &catalog)), &layers);
    assert_eq!(conflicts, BTreeSet::from([Slot::Head]));
}

#[test]
fn test_disallow_kit_change_in_all_locked_slot() {
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Torso, Some(LockStatus::All));
    let shirt = SlotInfo::kit(KitId(22), Slot::Torso);
    assert!(!locks.is_allowed(Slot::Torso, Some(&shirt), &layers));
}

#[test]
fn test_disallow_item_change_in_item_locked_slot() {
    let catalog = catalog();
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Head, Some(LockStatus::Item));
    assert!(!locks.is_allowed(Slot::Head, Some(&item(RED_PARTY_HAT, &catalog)), &layers));
}

#[test]
fn test_disallow_kit_over_existing_item_under_item_lock() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Torso, Some(item(STUDDED_BODY, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Torso, Some(LockStatus::Item));
    // replacing the item with a kit is still an item-level change
    let shirt = SlotInfo::kit(KitId(22), Slot::Torso);
    assert!(!locks.is_allowed(Slot::Torso, Some(&shirt), &layers));
}

#[test]
fn test_disallow_unset_of_all_locked_slot() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Cape, Some(item(BLUE_CAPE, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Cape, Some(LockStatus::All));
    assert!(!locks.is_allowed(Slot::Cape, None, &layers));
}

#[test]
fn test_disallow_change_under_locked_hiding_item() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Head, Some(item(RUNE_MED_HELM, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Head, Some(LockStatus::All));
    let curls = SlotInfo::kit(KitId(225), Slot::Hair);
    let conflicts = locks.conflicting_slots(Slot::Hair, Some(&curls), &layers);
    assert_eq!(conflicts, BTreeSet::from([Slot::Head]));
    // even an explicit nothing under the locked helm is rejected
    assert!(!locks.is_allowed(Slot::Hair, Some(&SlotInfo::nothing(Slot::Hair)), &layers));
    assert!(!locks.is_allowed(Slot::Hair, None, &layers));
}

#[test]
fn test_disallow_placing_item_that_hides_locked_slot() {
    let catalog = catalog();
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Hair, Some(LockStatus::All));
    let conflicts =
        locks.conflicting_slots(Slot::Head, Some(&item(RUNE_MED_HELM, &catalog)), &layers);
    assert_eq!(conflicts, BTreeSet::from([Slot::Hair]));
}

#[test]
fn test_disallow_removing_item_that_hides_locked_slot() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Head, Some(item(RUNE_MED_HELM, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Hair, Some(LockStatus::All));
    // unsetting the helm would un-hide the locked hair
    assert!(!locks.is_allowed(Slot::Head, None, &layers));
    // so would replacing it with a non-hiding hat
    assert!(!locks.is_allowed(Slot::Head, Some(&item(RED_PARTY_HAT, &catalog)), &layers));
}

#[test]
fn test_disallow_cape_swap_that_unhides_locked_head() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Cape, Some(item(HOODED_CLOAK, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Head, Some(LockStatus::All));
    let conflicts =
        locks.conflicting_slots(Slot::Cape, Some(&item(BLUE_CAPE, &catalog)), &layers);
    assert_eq!(conflicts, BTreeSet::from([Slot::Head]));
}

#[test]
fn test_disallow_displacing_unlocked_item_that_hides_locked_slot() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Head, Some(item(RUNE_MED_HELM, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Hair, Some(LockStatus::All));
    // the party hat displaces the helm, whose removal would un-hide hair
    assert!(!locks.is_allowed(Slot::Head, Some(&item(RED_PARTY_HAT, &catalog)), &layers));
}

#[test]
fn test_disallow_transitive_displacement_through_shared_hides() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Torso, Some(item(PLAGUE_JACKET, &catalog)), false);
    let mut locks = Locks::new();
    locks.set(Slot::Shield, Some(LockStatus::All));
    // the gloves displace the jacket via shared hidden hands, but also
    // newly hide the locked shield
    let conflicts =
        locks.conflicting_slots(Slot::Weapon, Some(&item(BOXING_GLOVES, &catalog)), &layers);
    assert_eq!(conflicts, BTreeSet::from([Slot::Shield]));
}

#[test]
fn test_disallow_two_handed_weapon_with_locked_shield() {
    let catalog = catalog();
    let layers = masc_layers();
    let mut locks = Locks::new();
    locks.set(Slot::Shield, Some(LockStatus::All));
    assert!(!locks.is_allowed(Slot::Weapon, Some(&item(WHITE_2H_SWORD, &catalog)), &layers));
}
