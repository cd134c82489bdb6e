//! Change notifications emitted by the wardrobe.

use vestiary_domain::color::ColorChannel;
use vestiary_domain::icon::JawIcon;
use vestiary_domain::ids::KitId;
use vestiary_domain::slot::Slot;

use crate::locks::LockStatus;
use crate::model_info::LayerKind;
use crate::slot_info::SlotInfo;

/// One change to wardrobe state. Listeners match on the variants they care
/// about and ignore the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ItemChanged {
        slot: Slot,
        layer: LayerKind,
        info: Option<SlotInfo>,
    },
    KitChanged {
        slot: Slot,
        layer: LayerKind,
        kit_id: Option<KitId>,
    },
    ColorChanged {
        channel: ColorChannel,
        layer: LayerKind,
        color_id: Option<i32>,
    },
    IconChanged {
        layer: LayerKind,
        icon: Option<JawIcon>,
    },
    LockChanged {
        slot: Slot,
        status: Option<LockStatus>,
    },
    ColorLockChanged {
        channel: ColorChannel,
        locked: bool,
    },
    IconLockChanged {
        locked: bool,
    },
    /// A slot's real kit became known from a derived composition.
    KnownKitChanged {
        slot: Slot,
    },
    HistoryChanged {
        undo_size: usize,
        redo_size: usize,
    },
}

/// Listener callback owned by the wardrobe for its lifetime.
pub type Listener = Box<dyn FnMut(&Event)>;
