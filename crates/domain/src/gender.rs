//! Body type of the character model, as reported by the live composition.
//!
//! Kit ids are gender-keyed; an unknown gender (before the first derive)
//! means no kit id can be resolved and fallbacks degrade to nothing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    /// Parses the composition's gender code. Codes other than 0/1 are
    /// unknown and yield `None`.
    pub fn from_code(code: i32) -> Option<Gender> {
        match code {
            0 => Some(Gender::Masculine),
            1 => Some(Gender::Feminine),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Gender::Masculine => 0,
            Gender::Feminine => 1,
        }
    }
}
