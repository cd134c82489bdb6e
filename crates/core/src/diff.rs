//! Reversible deltas.
//!
//! A [`Diff`] names what one logical operation removed (`out`) and added
//! (`in`), never a full snapshot. Applying a diff's `out` side through the
//! layer mutators restores the prior state, which is the basis of undo.

use std::collections::BTreeMap;

use vestiary_domain::color::ColorChannel;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::slot::Slot;

use crate::slot_info::SlotInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    out_slots: BTreeMap<Slot, SlotInfo>,
    in_slots: BTreeMap<Slot, SlotInfo>,
    out_colors: BTreeMap<ColorChannel, i32>,
    in_colors: BTreeMap<ColorChannel, i32>,
    out_icon: Option<JawIcon>,
    in_icon: Option<JawIcon>,
}

impl Diff {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of_slots(
        out_slots: BTreeMap<Slot, SlotInfo>,
        in_slots: BTreeMap<Slot, SlotInfo>,
    ) -> Self {
        Self {
            out_slots,
            in_slots,
            ..Self::default()
        }
    }

    pub fn of_color(channel: ColorChannel, out_color: Option<i32>, in_color: Option<i32>) -> Self {
        if out_color == in_color {
            return Self::empty();
        }
        let mut diff = Self::empty();
        if let Some(out) = out_color {
            diff.out_colors.insert(channel, out);
        }
        if let Some(inc) = in_color {
            diff.in_colors.insert(channel, inc);
        }
        diff
    }

    pub fn of_icon(out_icon: Option<JawIcon>, in_icon: Option<JawIcon>) -> Self {
        if out_icon == in_icon {
            return Self::empty();
        }
        Self {
            out_icon,
            in_icon,
            ..Self::default()
        }
    }

    /// Folds two diffs into one; on key collisions `first` wins. Used to
    /// collapse the many small diffs of a multi-slot operation into a single
    /// undo step.
    pub fn merge(first: Diff, second: Diff) -> Diff {
        let mut result = second;
        result.out_slots.extend(first.out_slots);
        result.in_slots.extend(first.in_slots);
        result.out_colors.extend(first.out_colors);
        result.in_colors.extend(first.in_colors);
        result.out_icon = first.out_icon.or(result.out_icon);
        result.in_icon = first.in_icon.or(result.in_icon);
        result
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn out_slots(&self) -> &BTreeMap<Slot, SlotInfo> {
        &self.out_slots
    }

    pub fn in_slots(&self) -> &BTreeMap<Slot, SlotInfo> {
        &self.in_slots
    }

    pub fn out_colors(&self) -> &BTreeMap<ColorChannel, i32> {
        &self.out_colors
    }

    pub fn in_colors(&self) -> &BTreeMap<ColorChannel, i32> {
        &self.in_colors
    }

    pub fn out_icon(&self) -> Option<JawIcon> {
        self.out_icon
    }

    pub fn in_icon(&self) -> Option<JawIcon> {
        self.in_icon
    }
}
