//! Shelter model: a community animal shelter listing

use serde::{Deserialize, Serialize};

/// An animal shelter listed in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelter {
    /// Store-assigned identifier
    pub id: u64,
    /// Shelter name, at most 50 characters
    pub name: String,
    /// Street address, at most 100 characters
    pub street_addr: String,
    /// Identifier of the shelter's Location record
    pub location_id: u64,
    /// 5-digit ZIP code
    pub zip: String,
    /// Largest number of animals the shelter can hold
    pub max_capacity: u32,
    /// Number of animals currently held
    pub current_capacity: u32,
    /// Photo URL shown on the shelter's page
    pub photo: String,
    /// Listing owner
    pub owner: String,
}

impl Shelter {
    /// Format the directory line for this shelter
    #[must_use]
    pub fn display_with_location(&self, city: &str, state: &str) -> String {
        format!("{} -- {}, {}", self.name, city, state)
    }
}
