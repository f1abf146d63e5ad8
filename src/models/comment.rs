//! Comment model: user commentary attached to a shelter

use serde::{Deserialize, Serialize};
use std::fmt;

/// A comment left on a shelter's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned identifier
    pub id: u64,
    /// Comment author
    pub author: String,
    /// Comment body
    pub content: String,
    /// Identifier of the shelter commented on
    pub shelter_id: u64,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.author, self.content)
    }
}
