//! Ingesting live compositions into the real layer.

use vestiary_domain::gender::Gender;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::ids::KitId;
use vestiary_domain::kit::{ArmsKit, JawKit, LegsKit};
use vestiary_domain::slot::Slot;

use crate::slot_info::SlotInfo;

use super::fixtures::*;

#[test]
fn test_derive_splits_items_and_kits() {
    let catalog = catalog();
    let mut layers = masc_layers();
    let learned = layers.derive_equipment(
        &equipment(&[
            (Slot::Cape, BLUE_CAPE.encoded()),
            (Slot::Weapon, BLACK_MACE.encoded()),
            (Slot::Torso, KitId(18).encoded()),
            (Slot::Arms, KitId(26).encoded()),
            (Slot::Legs, KitId(36).encoded()),
            (Slot::Hair, KitId(225).encoded()),
            (Slot::Hands, KitId(34).encoded()),
            (Slot::Boots, KitId(42).encoded()),
            (Slot::Jaw, KitId(116).encoded()),
        ]),
        &catalog,
    );
    assert_eq!(
        learned,
        vec![
            Slot::Torso,
            Slot::Arms,
            Slot::Legs,
            Slot::Hair,
            Slot::Hands,
            Slot::Boots,
            Slot::Jaw,
        ]
    );
    let real = layers.real_models();
    assert_eq!(
        real.items().get(Slot::Cape),
        Some(&item(BLUE_CAPE, &catalog))
    );
    assert_eq!(
        real.items().get(Slot::Weapon),
        Some(&item(BLACK_MACE, &catalog))
    );
    assert_eq!(real.kits().get(Slot::Torso), Some(KitId(18)));
    assert_eq!(real.kits().get(Slot::Jaw), Some(KitId(116)));
    assert_eq!(real.icon(), None);
}

#[test]
fn test_derive_splits_jaw_icon_item() {
    let catalog = catalog();
    let mut layers = masc_layers();
    let goatee_defender = JawKit::Goatee
        .icon_item(JawIcon::BaDefender)
        .unwrap()
        .encoded();
    let learned = layers.derive_equipment(
        &equipment(&[(Slot::Jaw, goatee_defender)]),
        &catalog,
    );
    assert!(learned.is_empty());
    let real = layers.real_models();
    assert_eq!(
        real.kits().get(Slot::Jaw),
        JawKit::Goatee.kit_id(Gender::Masculine)
    );
    assert_eq!(real.icon(), Some(JawIcon::BaDefender));
    assert!(real.items().get(Slot::Jaw).is_none());
}

#[test]
fn test_derive_bare_icon_item_stores_no_jaw_kit() {
    let catalog = catalog();
    let mut layers = masc_layers();
    let bare_defender = JawKit::NoJaw
        .icon_item(JawIcon::BaDefender)
        .unwrap()
        .encoded();
    layers.derive_equipment(&equipment(&[(Slot::Jaw, bare_defender)]), &catalog);
    let real = layers.real_models();
    assert_eq!(real.kits().get(Slot::Jaw), None);
    assert_eq!(real.icon(), Some(JawIcon::BaDefender));
}

#[test]
fn test_derive_same_array_is_a_no_op() {
    let catalog = catalog();
    let mut layers = masc_layers();
    let array = equipment(&[(Slot::Torso, KitId(18).encoded())]);
    assert_eq!(layers.derive_equipment(&array, &catalog), vec![Slot::Torso]);
    assert!(layers.derive_equipment(&array, &catalog).is_empty());
}

#[test]
fn test_derive_replaces_previous_items() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[(Slot::Cape, BLUE_CAPE.encoded())]),
        &catalog,
    );
    layers.derive_equipment(
        &equipment(&[(Slot::Head, RED_PARTY_HAT.encoded())]),
        &catalog,
    );
    let real = layers.real_models();
    assert!(real.items().get(Slot::Cape).is_none());
    assert!(real.items().get(Slot::Head).is_some());
}

#[test]
fn test_derive_non_equipment_sets_real_colors() {
    let layers = masc_layers();
    assert_eq!(layers.compute_colors(true), REAL_COLORS);
    assert_eq!(layers.gender(), Some(Gender::Masculine));
}

#[test]
fn test_gender_switch_swaps_virtual_kits_and_drops_real_ones() {
    let mut layers = masc_layers();
    let regular = ArmsKit::Regular.kit_id(Gender::Masculine).unwrap();
    layers.set(Slot::Arms, Some(SlotInfo::kit(regular, Slot::Arms)), false);
    let shorts = LegsKit::Shorts.kit_id(Gender::Masculine).unwrap();
    layers.restore_real_kits([(Slot::Legs, shorts)].into_iter().collect());

    layers.derive_non_equipment(1, &REAL_COLORS, REAL_IDLE_ANIMATION);

    // the committed kit swaps to its closest analog
    assert_eq!(
        layers.virtual_models().kits().get(Slot::Arms),
        ArmsKit::ShortSleeves.kit_id(Gender::Feminine)
    );
    // the real kit no longer describes this character and is dropped
    assert_eq!(layers.real_models().kits().get(Slot::Legs), None);
}

#[test]
fn test_unknown_gender_code_clears_gender() {
    let mut layers = masc_layers();
    layers.derive_non_equipment(7, &REAL_COLORS, REAL_IDLE_ANIMATION);
    assert_eq!(layers.gender(), None);
}

#[test]
fn test_reset_real_clears_derived_state() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[(Slot::Cape, BLUE_CAPE.encoded())]),
        &catalog,
    );
    layers.reset_real();
    assert!(layers.real_models().items().get(Slot::Cape).is_none());
    assert_eq!(layers.compute_colors(true), [0; 5]);
}
