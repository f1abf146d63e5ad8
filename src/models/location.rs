//! Location model: a persisted unique (city, state) pair

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique (city, state) pair associated with zero or more shelters
///
/// Locations are created lazily when a shelter references an unseen,
/// dataset-validated city/state, and are only ever removed by cascading
/// deletes; the geographic core reads and produces candidate values but
/// never writes Location records itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Store-assigned identifier
    pub id: u64,
    /// City name, title-cased per word
    pub city: String,
    /// Uppercase 2-letter state code
    pub state: String,
}

impl Location {
    /// Create a new location record
    #[must_use]
    pub fn new(id: u64, city: String, state: String) -> Self {
        Self { id, city, state }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}
