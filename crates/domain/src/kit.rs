//! Base-model kit tables.
//!
//! Kit ids are gender-keyed: a kit either has an id for a given body type or
//! does not exist for it. A handful of kits that differ in name between the
//! two genders are paired as "mirrors" so a gender switch can substitute the
//! closest analog instead of dropping the slot.
//!
//! The jaw table is special: jaw kits can combine with a [`JawIcon`] into an
//! icon item, which is how team badges render on an otherwise bare jaw.

use serde::{Deserialize, Serialize};

use crate::gender::Gender;
use crate::icon::JawIcon;
use crate::ids::{ItemId, KitId, KIT_OFFSET};
use crate::slot::Slot;

macro_rules! kit_enum {
    ($name:ident, $slot:expr, { $($variant:ident => ($masc:expr, $fem:expr)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn slot(self) -> Slot {
                $slot
            }

            /// Kit id for the given body type, if this kit exists for it.
            pub fn kit_id(self, gender: Gender) -> Option<KitId> {
                let (masc, fem): (Option<i32>, Option<i32>) = match self {
                    $($name::$variant => ($masc, $fem)),+
                };
                match gender {
                    Gender::Masculine => masc.map(KitId),
                    Gender::Feminine => fem.map(KitId),
                }
            }
        }
    };
}

kit_enum!(HairKit, Slot::Hair, {
    Bald => (Some(0), Some(45)),
    Dreadlocks => (Some(1), Some(47)),
    Long => (Some(2), Some(48)),
    Medium => (Some(3), Some(49)),
    Tonsure => (Some(4), Some(174)),
    Short => (Some(5), Some(51)),
    Cropped => (Some(6), Some(52)),
    WildSpikes => (Some(7), Some(53)),
    Spikes => (Some(8), Some(54)),
    Mohawk => (Some(9), Some(175)),
    Bun => (Some(221), Some(46)),
    Pigtails => (Some(222), Some(50)),
    Curls => (Some(225), Some(119)),
    Ponytail => (Some(226), Some(121)),
    Braids => (Some(227), Some(122)),
});

kit_enum!(TorsoKit, Slot::Torso, {
    Plain => (Some(18), Some(56)),
    Shirt => (Some(22), Some(90)),
    Torn => (Some(24), Some(60)),
    Sweater => (Some(105), Some(89)),
    Vest => (Some(107), Some(91)),
    Simple => (None, Some(59)),
    Frilly => (None, Some(92)),
});

kit_enum!(ArmsKit, Slot::Arms, {
    Regular => (Some(26), None),
    Musclebound => (Some(27), None),
    LooseSleeved => (Some(28), None),
    LargeCuffed => (Some(29), None),
    Thin => (Some(30), None),
    ShoulderPads => (Some(31), None),
    ThinStripe => (Some(32), Some(97)),
    ThickStripe => (Some(84), None),
    WhiteCuffs => (Some(85), Some(96)),
    Tatty => (Some(87), Some(98)),
    Ripped => (Some(88), None),
    ShortSleeves => (None, Some(61)),
    BareArms => (None, Some(62)),
    Muscley => (None, Some(63)),
    LongSleeved => (None, Some(64)),
    LargeCuffs => (None, Some(65)),
    FrillyArms => (None, Some(66)),
    SweaterArms => (None, Some(95)),
    BareShoulders => (None, Some(99)),
});

kit_enum!(LegsKit, Slot::Legs, {
    Plain => (Some(36), Some(70)),
    Shorts => (Some(37), None),
    Flares => (Some(38), Some(72)),
    Beach => (Some(41), None),
    RippedLegs => (Some(103), None),
    Patched => (Some(104), None),
    ShortSkirt => (None, Some(77)),
    BigHem => (None, Some(136)),
    TornSkirt => (None, Some(139)),
    PatchedSkirt => (None, Some(140)),
});

kit_enum!(HandsKit, Slot::Hands, {
    Plain => (Some(34), Some(68)),
    Bracers => (Some(35), Some(69)),
});

kit_enum!(BootsKit, Slot::Boots, {
    Small => (Some(42), Some(79)),
    Large => (Some(43), Some(80)),
    Minecart => (Some(82), Some(83)),
});

/// A facial-hair kit. Unlike other kits, a jaw kit can pair with a
/// [`JawIcon`] to form an icon item, which takes over the slot's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JawKit {
    /// Only valid when a worn item obscures the jaw entirely.
    NoJaw,
    Goatee,
    LongJaw,
    MediumJaw,
    SmallMoustache,
    CleanShaven,
    ShortJaw,
    Pointy,
    Split,
    Handlebar,
    Mutton,
    FullMutton,
    BigMoustache,
    WaxedMoustache,
    Dali,
    Vizier,
}

impl JawKit {
    pub const ALL: &'static [JawKit] = &[
        JawKit::NoJaw,
        JawKit::Goatee,
        JawKit::LongJaw,
        JawKit::MediumJaw,
        JawKit::SmallMoustache,
        JawKit::CleanShaven,
        JawKit::ShortJaw,
        JawKit::Pointy,
        JawKit::Split,
        JawKit::Handlebar,
        JawKit::Mutton,
        JawKit::FullMutton,
        JawKit::BigMoustache,
        JawKit::WaxedMoustache,
        JawKit::Dali,
        JawKit::Vizier,
    ];

    pub fn slot(self) -> Slot {
        Slot::Jaw
    }

    pub fn kit_id(self, gender: Gender) -> Option<KitId> {
        let (masc, fem) = match self {
            JawKit::NoJaw => (-256, -256),
            JawKit::Goatee => (10, 292),
            JawKit::LongJaw => (11, 293),
            JawKit::MediumJaw => (12, 294),
            JawKit::SmallMoustache => (13, 295),
            JawKit::CleanShaven => (14, 296),
            JawKit::ShortJaw => (15, 297),
            JawKit::Pointy => (16, 298),
            JawKit::Split => (17, 299),
            JawKit::Handlebar => (111, 300),
            JawKit::Mutton => (112, 301),
            JawKit::FullMutton => (113, 302),
            JawKit::BigMoustache => (114, 303),
            JawKit::WaxedMoustache => (115, 304),
            JawKit::Dali => (116, 305),
            JawKit::Vizier => (117, 306),
        };
        match gender {
            Gender::Masculine => Some(KitId(masc)),
            Gender::Feminine => Some(KitId(fem)),
        }
    }

    /// Item id of this jaw combined with the given icon. `Nothing` never
    /// resolves to an item.
    pub fn icon_item(self, icon: JawIcon) -> Option<ItemId> {
        use JawIcon::{BaAttacker, BaCollector, BaDefender, BaHealer, SwBlue, SwRed};
        let id = match (self, icon) {
            (JawKit::NoJaw, BaAttacker) => 10556,
            (JawKit::NoJaw, BaDefender) => 10558,
            (JawKit::NoJaw, BaCollector) => 10557,
            (JawKit::NoJaw, BaHealer) => 10559,
            (JawKit::NoJaw, SwBlue) => 25212,
            (JawKit::NoJaw, SwRed) => 25228,
            (JawKit::Goatee, BaAttacker) => 23460,
            (JawKit::Goatee, BaDefender) => 23466,
            (JawKit::Goatee, BaCollector) => 22339,
            (JawKit::Goatee, BaHealer) => 23478,
            (JawKit::Goatee, SwBlue) => 25213,
            (JawKit::Goatee, SwRed) => 25229,
            (JawKit::LongJaw, BaAttacker) => 22723,
            (JawKit::LongJaw, BaDefender) => 22345,
            (JawKit::LongJaw, BaCollector) => 23471,
            (JawKit::LongJaw, BaHealer) => 22311,
            (JawKit::LongJaw, SwBlue) => 25214,
            (JawKit::LongJaw, SwRed) => 25230,
            (JawKit::MediumJaw, BaAttacker) => 23461,
            (JawKit::MediumJaw, BaDefender) => 22728,
            (JawKit::MediumJaw, BaCollector) => 23472,
            (JawKit::MediumJaw, BaHealer) => 23479,
            (JawKit::MediumJaw, SwBlue) => 25215,
            (JawKit::MediumJaw, SwRed) => 25231,
            (JawKit::SmallMoustache, BaAttacker) => 22722,
            (JawKit::SmallMoustache, BaDefender) => 22344,
            (JawKit::SmallMoustache, BaCollector) => 22338,
            (JawKit::SmallMoustache, BaHealer) => 22310,
            (JawKit::SmallMoustache, SwBlue) => 25216,
            (JawKit::SmallMoustache, SwRed) => 25232,
            (JawKit::CleanShaven, BaAttacker) => 23462,
            (JawKit::CleanShaven, BaDefender) => 23467,
            (JawKit::CleanShaven, BaCollector) => 23473,
            (JawKit::CleanShaven, BaHealer) => 23480,
            (JawKit::CleanShaven, SwBlue) => 25217,
            (JawKit::CleanShaven, SwRed) => 25233,
            (JawKit::ShortJaw, BaAttacker) => 23463,
            (JawKit::ShortJaw, BaDefender) => 23468,
            (JawKit::ShortJaw, BaCollector) => 22337,
            (JawKit::ShortJaw, BaHealer) => 22309,
            (JawKit::ShortJaw, SwBlue) => 25218,
            (JawKit::ShortJaw, SwRed) => 25234,
            (JawKit::Pointy, BaAttacker) => 22721,
            (JawKit::Pointy, BaDefender) => 22343,
            (JawKit::Pointy, BaCollector) => 23474,
            (JawKit::Pointy, BaHealer) => 23481,
            (JawKit::Pointy, SwBlue) => 25219,
            (JawKit::Pointy, SwRed) => 25235,
            (JawKit::Split, BaAttacker) => 23464,
            (JawKit::Split, BaDefender) => 23469,
            (JawKit::Split, BaCollector) => 22315,
            (JawKit::Split, BaHealer) => 23482,
            (JawKit::Split, SwBlue) => 25220,
            (JawKit::Split, SwRed) => 25236,
            (JawKit::Handlebar, BaAttacker) => 22349,
            (JawKit::Handlebar, BaDefender) => 22342,
            (JawKit::Handlebar, BaCollector) => 23475,
            (JawKit::Handlebar, BaHealer) => 22308,
            (JawKit::Handlebar, SwBlue) => 25221,
            (JawKit::Handlebar, SwRed) => 25237,
            (JawKit::Mutton, BaAttacker) => 22730,
            (JawKit::Mutton, BaDefender) => 23470,
            (JawKit::Mutton, BaCollector) => 22314,
            (JawKit::Mutton, BaHealer) => 23483,
            (JawKit::Mutton, SwBlue) => 25222,
            (JawKit::Mutton, SwRed) => 25238,
            (JawKit::FullMutton, BaAttacker) => 22348,
            (JawKit::FullMutton, BaDefender) => 22341,
            (JawKit::FullMutton, BaCollector) => 23476,
            (JawKit::FullMutton, BaHealer) => 20802,
            (JawKit::FullMutton, SwBlue) => 25223,
            (JawKit::FullMutton, SwRed) => 25239,
            (JawKit::BigMoustache, BaAttacker) => 22729,
            (JawKit::BigMoustache, BaDefender) => 22727,
            (JawKit::BigMoustache, BaCollector) => 22313,
            (JawKit::BigMoustache, BaHealer) => 23484,
            (JawKit::BigMoustache, SwBlue) => 25224,
            (JawKit::BigMoustache, SwRed) => 25240,
            (JawKit::WaxedMoustache, BaAttacker) => 22347,
            (JawKit::WaxedMoustache, BaDefender) => 22340,
            (JawKit::WaxedMoustache, BaCollector) => 22724,
            (JawKit::WaxedMoustache, BaHealer) => 10567,
            (JawKit::WaxedMoustache, SwBlue) => 25225,
            (JawKit::WaxedMoustache, SwRed) => 25241,
            (JawKit::Dali, BaAttacker) => 23465,
            (JawKit::Dali, BaDefender) => 22726,
            (JawKit::Dali, BaCollector) => 22312,
            (JawKit::Dali, BaHealer) => 23485,
            (JawKit::Dali, SwBlue) => 25226,
            (JawKit::Dali, SwRed) => 25242,
            (JawKit::Vizier, BaAttacker) => 22346,
            (JawKit::Vizier, BaDefender) => 22725,
            (JawKit::Vizier, BaCollector) => 23477,
            (JawKit::Vizier, BaHealer) => 23486,
            (JawKit::Vizier, SwBlue) => 25227,
            (JawKit::Vizier, SwRed) => 25243,
            (_, JawIcon::Nothing) => return None,
        };
        Some(ItemId(id))
    }

    /// Reverse lookup from a kit id (either gender).
    pub fn from_kit_id(kit_id: KitId) -> Option<JawKit> {
        JawKit::ALL.iter().copied().find(|kit| {
            kit.kit_id(Gender::Masculine) == Some(kit_id)
                || kit.kit_id(Gender::Feminine) == Some(kit_id)
        })
    }

    /// Reverse lookup from an encoded occupant id: either a kit-band id of
    /// a jaw kit, or the item-band id of one of its icon items.
    pub fn from_equipment_id(equipment_id: i32) -> Option<JawKit> {
        if let Some(kit) = JawKit::from_kit_id(KitId(equipment_id - KIT_OFFSET)) {
            return Some(kit);
        }
        JawKit::ALL.iter().copied().find(|kit| {
            JawIcon::ALL
                .iter()
                .any(|icon| kit.icon_item(*icon).map(ItemId::encoded) == Some(equipment_id))
        })
    }
}

/// The icon embedded in a jaw icon item, or `Nothing` for any other item.
pub fn icon_from_item_id(item_id: ItemId) -> JawIcon {
    for kit in JawKit::ALL {
        for icon in JawIcon::ALL {
            if kit.icon_item(icon) == Some(item_id) {
                return icon;
            }
        }
    }
    JawIcon::Nothing
}

/// Encoded occupant id for a jaw kit combined with an optional icon. A
/// non-trivial icon turns the slot into the kit's icon item; otherwise the
/// plain kit encoding is used.
pub fn jaw_equipment_id(kit_id: KitId, icon: Option<JawIcon>) -> i32 {
    if let Some(icon) = icon {
        if icon != JawIcon::Nothing {
            if let Some(item) = JawKit::from_kit_id(kit_id).and_then(|kit| kit.icon_item(icon)) {
                return item.encoded();
            }
        }
    }
    kit_id.encoded()
}

/// A kit from any slot's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKit {
    Hair(HairKit),
    Torso(TorsoKit),
    Arms(ArmsKit),
    Legs(LegsKit),
    Hands(HandsKit),
    Boots(BootsKit),
    Jaw(JawKit),
}

impl SlotKit {
    pub fn slot(self) -> Slot {
        match self {
            SlotKit::Hair(_) => Slot::Hair,
            SlotKit::Torso(_) => Slot::Torso,
            SlotKit::Arms(_) => Slot::Arms,
            SlotKit::Legs(_) => Slot::Legs,
            SlotKit::Hands(_) => Slot::Hands,
            SlotKit::Boots(_) => Slot::Boots,
            SlotKit::Jaw(_) => Slot::Jaw,
        }
    }

    pub fn kit_id(self, gender: Gender) -> Option<KitId> {
        match self {
            SlotKit::Hair(kit) => kit.kit_id(gender),
            SlotKit::Torso(kit) => kit.kit_id(gender),
            SlotKit::Arms(kit) => kit.kit_id(gender),
            SlotKit::Legs(kit) => kit.kit_id(gender),
            SlotKit::Hands(kit) => kit.kit_id(gender),
            SlotKit::Boots(kit) => kit.kit_id(gender),
            SlotKit::Jaw(kit) => kit.kit_id(gender),
        }
    }

    /// The closest analog kit in the other gender family, for kits that do
    /// not exist under both. Pairs are symmetric.
    pub fn mirrored(self) -> Option<SlotKit> {
        let mirror = match self {
            SlotKit::Arms(ArmsKit::Regular) => SlotKit::Arms(ArmsKit::ShortSleeves),
            SlotKit::Arms(ArmsKit::ShortSleeves) => SlotKit::Arms(ArmsKit::Regular),
            SlotKit::Arms(ArmsKit::Musclebound) => SlotKit::Arms(ArmsKit::Muscley),
            SlotKit::Arms(ArmsKit::Muscley) => SlotKit::Arms(ArmsKit::Musclebound),
            SlotKit::Arms(ArmsKit::LooseSleeved) => SlotKit::Arms(ArmsKit::FrillyArms),
            SlotKit::Arms(ArmsKit::FrillyArms) => SlotKit::Arms(ArmsKit::LooseSleeved),
            SlotKit::Arms(ArmsKit::LargeCuffed) => SlotKit::Arms(ArmsKit::LargeCuffs),
            SlotKit::Arms(ArmsKit::LargeCuffs) => SlotKit::Arms(ArmsKit::LargeCuffed),
            SlotKit::Arms(ArmsKit::Thin) => SlotKit::Arms(ArmsKit::LongSleeved),
            SlotKit::Arms(ArmsKit::LongSleeved) => SlotKit::Arms(ArmsKit::Thin),
            SlotKit::Arms(ArmsKit::ShoulderPads) => SlotKit::Arms(ArmsKit::BareArms),
            SlotKit::Arms(ArmsKit::BareArms) => SlotKit::Arms(ArmsKit::ShoulderPads),
            SlotKit::Arms(ArmsKit::ThickStripe) => SlotKit::Arms(ArmsKit::SweaterArms),
            SlotKit::Arms(ArmsKit::SweaterArms) => SlotKit::Arms(ArmsKit::ThickStripe),
            SlotKit::Arms(ArmsKit::Ripped) => SlotKit::Arms(ArmsKit::BareShoulders),
            SlotKit::Arms(ArmsKit::BareShoulders) => SlotKit::Arms(ArmsKit::Ripped),
            SlotKit::Legs(LegsKit::Shorts) => SlotKit::Legs(LegsKit::ShortSkirt),
            SlotKit::Legs(LegsKit::ShortSkirt) => SlotKit::Legs(LegsKit::Shorts),
            SlotKit::Legs(LegsKit::RippedLegs) => SlotKit::Legs(LegsKit::TornSkirt),
            SlotKit::Legs(LegsKit::TornSkirt) => SlotKit::Legs(LegsKit::RippedLegs),
            SlotKit::Legs(LegsKit::Patched) => SlotKit::Legs(LegsKit::PatchedSkirt),
            SlotKit::Legs(LegsKit::PatchedSkirt) => SlotKit::Legs(LegsKit::Patched),
            SlotKit::Legs(LegsKit::Beach) => SlotKit::Legs(LegsKit::BigHem),
            SlotKit::Legs(LegsKit::BigHem) => SlotKit::Legs(LegsKit::Beach),
            _ => return None,
        };
        Some(mirror)
    }
}

/// All kits in the given slot's table.
pub fn kits_in_slot(slot: Slot) -> Vec<SlotKit> {
    match slot {
        Slot::Hair => HairKit::ALL.iter().copied().map(SlotKit::Hair).collect(),
        Slot::Torso => TorsoKit::ALL.iter().copied().map(SlotKit::Torso).collect(),
        Slot::Arms => ArmsKit::ALL.iter().copied().map(SlotKit::Arms).collect(),
        Slot::Legs => LegsKit::ALL.iter().copied().map(SlotKit::Legs).collect(),
        Slot::Hands => HandsKit::ALL.iter().copied().map(SlotKit::Hands).collect(),
        Slot::Boots => BootsKit::ALL.iter().copied().map(SlotKit::Boots).collect(),
        Slot::Jaw => JawKit::ALL.iter().copied().map(SlotKit::Jaw).collect(),
        _ => Vec::new(),
    }
}

/// Reverse lookup from a kit id to its kit and the gender that id belongs to.
pub fn kit_for_id(kit_id: KitId) -> Option<(SlotKit, Gender)> {
    for slot in Slot::ALL {
        for kit in kits_in_slot(slot) {
            for gender in [Gender::Masculine, Gender::Feminine] {
                if kit.kit_id(gender) == Some(kit_id) {
                    return Some((kit, gender));
                }
            }
        }
    }
    None
}

/// Resolves a kit id to a kit usable for `gender`: the kit itself when it
/// exists for that gender, otherwise its mirrored analog.
pub fn with_analog(kit_id: KitId, gender: Gender) -> Option<SlotKit> {
    let (kit, _) = kit_for_id(kit_id)?;
    if kit.kit_id(gender).is_some() {
        Some(kit)
    } else {
        kit.mirrored()
    }
}
