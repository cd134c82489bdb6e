//! Default kits shown when a slot's real base model is unknown.
//!
//! Without these, a composition with missing kit data would render with
//! holes in the model. Equipment-only slots (head, cape, amulet, weapon,
//! shield) have no fallback and encode to 0.

use crate::gender::Gender;
use crate::ids::{KitId, KIT_OFFSET};
use crate::kit::{ArmsKit, BootsKit, HairKit, HandsKit, JawKit, LegsKit, SlotKit, TorsoKit};
use crate::slot::Slot;

/// The fallback kit for a slot and body type.
pub fn fallback_kit(slot: Slot, gender: Gender) -> Option<SlotKit> {
    let kit = match (slot, gender) {
        (Slot::Hair, Gender::Masculine) => SlotKit::Hair(HairKit::Bald),
        (Slot::Hair, Gender::Feminine) => SlotKit::Hair(HairKit::Pigtails),
        (Slot::Jaw, Gender::Masculine) => SlotKit::Jaw(JawKit::Goatee),
        (Slot::Jaw, Gender::Feminine) => SlotKit::Jaw(JawKit::CleanShaven),
        (Slot::Torso, Gender::Masculine) => SlotKit::Torso(TorsoKit::Plain),
        (Slot::Torso, Gender::Feminine) => SlotKit::Torso(TorsoKit::Simple),
        (Slot::Arms, Gender::Masculine) => SlotKit::Arms(ArmsKit::Regular),
        (Slot::Arms, Gender::Feminine) => SlotKit::Arms(ArmsKit::ShortSleeves),
        (Slot::Legs, _) => SlotKit::Legs(LegsKit::Plain),
        (Slot::Hands, _) => SlotKit::Hands(HandsKit::Plain),
        (Slot::Boots, _) => SlotKit::Boots(BootsKit::Small),
        _ => return None,
    };
    Some(kit)
}

/// The fallback kit id for a slot, or a sentinel whose encoding is 0 when
/// the slot has no fallback or the body type is unknown.
pub fn fallback_kit_id(slot: Slot, gender: Option<Gender>) -> KitId {
    gender
        .and_then(|gender| fallback_kit(slot, gender).and_then(|kit| kit.kit_id(gender)))
        .unwrap_or(KitId(-KIT_OFFSET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_exist_for_kit_slots() {
        for gender in [Gender::Masculine, Gender::Feminine] {
            for slot in [
                Slot::Hair,
                Slot::Jaw,
                Slot::Torso,
                Slot::Arms,
                Slot::Legs,
                Slot::Hands,
                Slot::Boots,
            ] {
                let kit = fallback_kit(slot, gender).unwrap();
                assert_eq!(kit.slot(), slot);
                assert!(kit.kit_id(gender).is_some());
            }
        }
    }

    #[test]
    fn test_no_fallback_for_equipment_slots() {
        assert_eq!(fallback_kit(Slot::Head, Gender::Masculine), None);
        assert_eq!(fallback_kit_id(Slot::Weapon, Some(Gender::Feminine)), KitId(-256));
        assert_eq!(fallback_kit_id(Slot::Hair, None), KitId(-256));
    }

    #[test]
    fn test_gendered_fallback_ids() {
        assert_eq!(fallback_kit_id(Slot::Hair, Some(Gender::Masculine)), KitId(0));
        assert_eq!(fallback_kit_id(Slot::Hair, Some(Gender::Feminine)), KitId(50));
        assert_eq!(fallback_kit_id(Slot::Legs, Some(Gender::Feminine)), KitId(70));
    }
}
