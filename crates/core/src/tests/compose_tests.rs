//! Whole-stack composition scenarios: layer precedence, hard overrides,
//! fallback fill, and idle animation resolution.

use vestiary_domain::color::ColorChannel;
use vestiary_domain::gender::Gender;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::ids::KitId;
use vestiary_domain::kit::{BootsKit, JawKit};
use vestiary_domain::slot::{Slot, SLOT_COUNT};

use crate::layers::Layers;
use crate::slot_info::SlotInfo;

use super::fixtures::*;

#[test]
fn test_fallbacks_fill_empty_composition() {
    let layers = masc_layers();
    assert_eq!(
        layers.compute_equipment(&catalog(), false),
        masc_fallback_equipment()
    );
}

#[test]
fn test_unknown_gender_composes_to_zero() {
    let layers = Layers::new();
    assert_eq!(
        layers.compute_equipment(&catalog(), false),
        [0; SLOT_COUNT]
    );
}

#[test]
fn test_virtual_items_outrank_real() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[
            (Slot::Torso, STUDDED_BODY.encoded()),
            (Slot::Legs, MIME_LEGS.encoded()),
        ]),
        &catalog,
    );
    layers.set(Slot::Torso, Some(item(BRONZE_PLATEBODY, &catalog)), false);

    let composed = layers.compute_equipment(&catalog, false);
    let mut expected = masc_fallback_equipment();
    expected[Slot::Torso.index()] = BRONZE_PLATEBODY.encoded();
    expected[Slot::Arms.index()] = 0; // hidden by the platebody
    expected[Slot::Legs.index()] = MIME_LEGS.encoded();
    assert_eq!(composed, expected);

    // real-only output ignores the override
    let real = layers.compute_equipment(&catalog, true);
    assert_eq!(real[Slot::Torso.index()], STUDDED_BODY.encoded());
    assert_eq!(real[Slot::Arms.index()], masc_fallback(Slot::Arms));
}

#[test]
fn test_preview_outranks_virtual() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Head, Some(item(RED_PARTY_HAT, &catalog)), false);
    layers.set(Slot::Head, Some(item(RUNE_MED_HELM, &catalog)), true);

    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Head.index()], RUNE_MED_HELM.encoded());
    assert_eq!(composed[Slot::Hair.index()], 0);

    layers.reset_preview();
    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Head.index()], RED_PARTY_HAT.encoded());
    assert_eq!(composed[Slot::Hair.index()], masc_fallback(Slot::Hair));
}

#[test]
fn test_minecart_boots_override_everything() {
    let catalog = catalog();
    let mut layers = masc_layers();
    let minecart = BootsKit::Minecart.kit_id(Gender::Masculine).unwrap();
    layers.derive_equipment(
        &equipment(&[
            (Slot::Boots, minecart.encoded()),
            (Slot::Weapon, BLACK_MACE.encoded()),
        ]),
        &catalog,
    );
    layers.set(Slot::Boots, Some(item(PINK_BOOTS, &catalog)), false);
    layers.set(Slot::Shield, Some(item(GILDED_KITESHIELD, &catalog)), false);

    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Boots.index()], minecart.encoded());
    assert_eq!(composed[Slot::Weapon.index()], 0);
    assert_eq!(composed[Slot::Shield.index()], 0);
}

#[test]
fn test_animation_disabling_weapon_pins_weapon_and_shield() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[(Slot::Weapon, MAGIC_CARPET.encoded())]),
        &catalog,
    );
    layers.set(Slot::Weapon, Some(item(WHITE_2H_SWORD, &catalog)), false);
    layers.set(Slot::Shield, Some(item(GILDED_KITESHIELD, &catalog)), false);

    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Weapon.index()], MAGIC_CARPET.encoded());
    assert_eq!(composed[Slot::Shield.index()], 0);
    // the pose is owned by the vehicle, so leave it unchanged
    assert_eq!(layers.compute_idle_animation(&catalog, false), None);
}

#[test]
fn test_icon_rides_on_fallback_jaw_kit() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set_icon(Some(JawIcon::BaDefender), false);

    let composed = layers.compute_equipment(&catalog, false);
    let expected = JawKit::Goatee
        .icon_item(JawIcon::BaDefender)
        .unwrap()
        .encoded();
    assert_eq!(composed[Slot::Jaw.index()], expected);
}

#[test]
fn test_icon_rides_on_bare_jaw_when_hidden() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.set(Slot::Head, Some(item(IRON_FULL_HELM, &catalog)), false);
    layers.set_icon(Some(JawIcon::BaDefender), false);

    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Head.index()], IRON_FULL_HELM.encoded());
    assert_eq!(composed[Slot::Hair.index()], 0);
    let expected = JawKit::NoJaw
        .icon_item(JawIcon::BaDefender)
        .unwrap()
        .encoded();
    assert_eq!(composed[Slot::Jaw.index()], expected);
}

#[test]
fn test_virtual_jaw_kit_combines_with_icon() {
    let catalog = catalog();
    let mut layers = masc_layers();
    let dali = JawKit::Dali.kit_id(Gender::Masculine).unwrap();
    layers.set(Slot::Jaw, Some(SlotInfo::kit(dali, Slot::Jaw)), false);
    layers.set_icon(Some(JawIcon::SwBlue), false);

    let composed = layers.compute_equipment(&catalog, false);
    let expected = JawKit::Dali.icon_item(JawIcon::SwBlue).unwrap().encoded();
    assert_eq!(composed[Slot::Jaw.index()], expected);
}

#[test]
fn test_explicit_nothing_blanks_instead_of_falling_through() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[(Slot::Cape, BLUE_CAPE.encoded())]),
        &catalog,
    );
    layers.set(Slot::Cape, Some(SlotInfo::nothing(Slot::Cape)), false);

    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Cape.index()], 0);
    assert_eq!(
        layers.compute_equipment(&catalog, true)[Slot::Cape.index()],
        BLUE_CAPE.encoded()
    );
}

#[test]
fn test_virtual_hair_kit_displaces_hiding_real_item() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[
            (Slot::Torso, KitId(18).encoded()),
            (Slot::Head, RUNE_MED_HELM.encoded()),
        ]),
        &catalog,
    );
    layers.set(Slot::Torso, Some(SlotInfo::kit(KitId(105), Slot::Torso)), false);
    // the helm would hide the hair the user chose to show, so the whole
    // helm assignment is dropped
    layers.set(Slot::Hair, Some(SlotInfo::kit(KitId(3), Slot::Hair)), false);

    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Torso.index()], KitId(105).encoded());
    assert_eq!(composed[Slot::Head.index()], 0);
    assert_eq!(composed[Slot::Hair.index()], KitId(3).encoded());
}

#[test]
fn test_compute_colors_precedence() {
    let mut layers = masc_layers();
    assert_eq!(layers.compute_colors(false), REAL_COLORS);

    layers.set_color(ColorChannel::Torso, Some(22), false);
    layers.set_color(ColorChannel::Torso, Some(7), true);
    layers.set_color(ColorChannel::Legs, Some(19), false);

    let mut expected = REAL_COLORS;
    expected[ColorChannel::Torso.index()] = 7;
    expected[ColorChannel::Legs.index()] = 19;
    assert_eq!(layers.compute_colors(false), expected);
    assert_eq!(layers.compute_colors(true), REAL_COLORS);
}

#[test]
fn test_idle_animation_unarmed_default() {
    let layers = masc_layers();
    assert_eq!(layers.compute_idle_animation(&catalog(), false), Some(808));
}

#[test]
fn test_idle_animation_from_real_weapon_table() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[(Slot::Weapon, WHITE_2H_SWORD.encoded())]),
        &catalog,
    );
    assert_eq!(
        layers.compute_idle_animation(&catalog, false),
        Some(WHITE_2H_SWORD_IDLE)
    );
}

#[test]
fn test_idle_animation_virtual_weapon_defaults_when_unknown() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[(Slot::Weapon, WHITE_2H_SWORD.encoded())]),
        &catalog,
    );
    layers.set(Slot::Weapon, Some(item(BLACK_MACE, &catalog)), false);
    assert_eq!(layers.compute_idle_animation(&catalog, false), Some(808));
}

#[test]
fn test_idle_animation_defaults_when_override_hides_real_weapon() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.derive_equipment(
        &equipment(&[(Slot::Weapon, WHITE_2H_SWORD.encoded())]),
        &catalog,
    );
    layers.set(Slot::Shield, Some(item(GILDED_KITESHIELD, &catalog)), false);
    assert_eq!(layers.compute_idle_animation(&catalog, false), Some(808));
    // the real-only output keeps the sword's stance
    assert_eq!(
        layers.compute_idle_animation(&catalog, true),
        Some(WHITE_2H_SWORD_IDLE)
    );
}

#[test]
fn test_idle_animation_unknown_real_weapon_keeps_last_seen() {
    let catalog = catalog();
    let mut layers = Layers::new();
    layers.derive_non_equipment(0, &REAL_COLORS, 1234);
    layers.derive_equipment(
        &equipment(&[(Slot::Weapon, BRONZE_DAGGER.encoded())]),
        &catalog,
    );
    assert_eq!(layers.compute_idle_animation(&catalog, false), Some(1234));
}

#[test]
fn test_restore_real_kits_survive_item_rederive() {
    let catalog = catalog();
    let mut layers = masc_layers();
    layers.restore_real_kits(
        [(Slot::Torso, KitId(22)), (Slot::Legs, KitId(38))]
            .into_iter()
            .collect(),
    );
    layers.derive_equipment(
        &equipment(&[(Slot::Head, RED_PARTY_HAT.encoded())]),
        &catalog,
    );
    let composed = layers.compute_equipment(&catalog, false);
    assert_eq!(composed[Slot::Torso.index()], KitId(22).encoded());
    assert_eq!(composed[Slot::Legs.index()], KitId(38).encoded());
    assert_eq!(composed[Slot::Head.index()], RED_PARTY_HAT.encoded());
}
