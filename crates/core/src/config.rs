//! Persistence shapes exchanged with the hosting collaborator.
//!
//! The core does no I/O; it produces these snapshots and restores from them
//! verbatim. A corrupt document loads as the empty default, never partially.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vestiary_domain::color::ColorChannel;
use vestiary_domain::ids::KitId;
use vestiary_domain::slot::Slot;

use crate::locks::LockStatus;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed saved {document}: {source}")]
    Malformed {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn malformed(document: &'static str, source: serde_json::Error) -> Self {
        Self::Malformed { document, source }
    }
}

/// The virtual layer as saved state: one combined slot map of encoded
/// occupant ids (items and kits are mutually exclusive per slot), colors,
/// and the icon id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedOutfit {
    #[serde(default)]
    pub slots: BTreeMap<Slot, i32>,
    #[serde(default)]
    pub colors: BTreeMap<ColorChannel, i32>,
    #[serde(default)]
    pub icon: Option<i32>,
}

/// Persisted lock state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocks {
    #[serde(default)]
    pub slots: BTreeMap<Slot, LockStatus>,
    #[serde(default)]
    pub colors: BTreeSet<ColorChannel>,
    #[serde(default)]
    pub icon: bool,
}

/// Real kits remembered per account, since they vanish from the live
/// composition on logout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRealKits {
    #[serde(default)]
    pub kits: BTreeMap<Slot, KitId>,
}

pub fn to_json<T: Serialize>(value: &T, document: &'static str) -> Result<String, ConfigError> {
    serde_json::to_string(value).map_err(|e| ConfigError::malformed(document, e))
}

/// Parses a saved document, falling back to the empty default when the
/// document is corrupt.
pub fn load_or_default<T: DeserializeOwned + Default>(json: &str, document: &'static str) -> T {
    match serde_json::from_str(json) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, document, "discarding corrupt saved state");
            T::default()
        }
    }
}
