//! The appearance preview engine.
//!
//! Character appearance is modeled as three layers of the same record
//! shape. The real layer mirrors what the character actually wears, the
//! virtual layer holds the user's committed overrides, and the preview
//! layer holds a transient hover. Composition folds the layers into the
//! final equipment, color, and idle animation outputs with
//! preview-over-virtual-over-real precedence.
//!
//! [`Wardrobe`] is the entry point; the other modules are exposed for
//! callers that need the individual pieces.

pub mod config;
pub mod diff;
pub mod event;
pub mod history;
pub mod layers;
pub mod locks;
pub mod model_info;
pub mod randomizer;
pub mod slot_info;
pub mod wardrobe;

pub use config::{ConfigError, SavedLocks, SavedOutfit, SavedRealKits};
pub use diff::Diff;
pub use event::{Event, Listener};
pub use history::History;
pub use layers::Layers;
pub use locks::{LockStatus, Locks};
pub use model_info::{LayerKind, ModelInfo};
pub use slot_info::{Occupant, SlotInfo};
pub use wardrobe::{CompositionSnapshot, Wardrobe};

#[cfg(test)]
mod tests;
