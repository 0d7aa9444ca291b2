use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a hero.
///
/// Assigned once on insert and never reused for another record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub i64);

impl HeroId {
    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for HeroId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
