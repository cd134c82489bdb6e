//! Vestiary domain - the value types underneath the appearance engine.
//!
//! Everything here is plain data: slot and color enumerations, the base-model
//! kit tables with their per-gender ids, jaw icons, the fallback table, and
//! the item metadata catalog fed by an external collaborator. No module in
//! this crate performs I/O or holds mutable global state; the engine crate
//! (`vestiary-core`) owns all composition behavior.

pub mod catalog;
pub mod color;
pub mod fallbacks;
pub mod gender;
pub mod icon;
pub mod ids;
pub mod kit;
pub mod slot;

pub use catalog::{CatalogError, ItemCatalog, ItemSlotData, MiscData, DEFAULT_IDLE_ANIMATION};
pub use color::ColorChannel;
pub use fallbacks::{fallback_kit, fallback_kit_id};
pub use gender::Gender;
pub use icon::JawIcon;
pub use ids::{ItemId, KitId};
pub use kit::{
    icon_from_item_id, jaw_equipment_id, kit_for_id, kits_in_slot, with_analog, ArmsKit, BootsKit,
    HairKit, HandsKit, JawKit, LegsKit, SlotKit, TorsoKit,
};
pub use slot::Slot;
