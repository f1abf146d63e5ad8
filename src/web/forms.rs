//! Form payloads and scrubbing for the directory API
//!
//! Field rules mirror what the directory accepts: bounded name and
//! address lengths, a capacity range, http(s) photo URLs, and search
//! parameters clamped to the configured radius bounds. Everything here
//! returns typed validation errors; nothing panics on bad input.

use serde::Deserialize;

use crate::Result;
use crate::config::SearchConfig;
use crate::error::ShelterSeekError;
use crate::store::ShelterDraft;

/// Submitted shelter form, unvalidated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShelterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    #[serde(default)]
    pub photo_url: String,
    /// Listing owner; client-supplied until accounts land
    #[serde(default = "default_owner")]
    pub owner: String,
}

fn default_owner() -> String {
    "User".to_string()
}

impl ShelterForm {
    /// Scrub the form into a draft the store will accept
    ///
    /// The city/state/ZIP triple is not checked here; the store's
    /// location gate owns that rule.
    pub fn validate(&self, search: &SearchConfig) -> Result<ShelterDraft> {
        if self.name.is_empty() {
            return Err(ShelterSeekError::validation("Shelter name can't be empty."));
        }
        if self.name.chars().count() > 50 {
            return Err(ShelterSeekError::validation(
                "Shelter name must be shorter than 51 characters.",
            ));
        }

        if self.street_address.is_empty() {
            return Err(ShelterSeekError::validation(
                "Street address can't be empty.",
            ));
        }
        if self.street_address.chars().count() > 100 {
            return Err(ShelterSeekError::validation(
                "Street address must be shorter than 101 characters.",
            ));
        }

        let max_capacity = self
            .max_capacity
            .ok_or_else(|| ShelterSeekError::validation("Maximum capacity cannot be blank."))?;
        if max_capacity == 0 || max_capacity > 10_000 {
            return Err(ShelterSeekError::validation(
                "Maximum capacity must be between 0 and 10,000.",
            ));
        }

        let photo = if self.photo_url.is_empty() {
            search.placeholder_photo.clone()
        } else if self.photo_url.starts_with("http://") || self.photo_url.starts_with("https://") {
            self.photo_url.clone()
        } else {
            return Err(ShelterSeekError::validation("Invalid Photo URL."));
        };

        Ok(ShelterDraft {
            name: self.name.clone(),
            street_addr: self.street_address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
            max_capacity,
            photo,
            owner: self.owner.clone(),
        })
    }
}

/// Submitted comment form
#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    /// Comment author; client-supplied until accounts land
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

fn default_author() -> String {
    "Anonymous".to_string()
}

/// Raw index query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexQuery {
    pub zip: Option<String>,
    pub radius: Option<String>,
}

/// Scrubbed search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub zip: String,
    pub radius_miles: u32,
}

/// Scrub the index query against the configured defaults and bounds
///
/// A missing ZIP falls back to the configured default; a supplied one is
/// truncated to its first five characters before lookup. A missing or
/// blank radius falls back to the default; anything else must parse as an
/// integer inside the configured bounds.
pub fn parse_search_query(query: &IndexQuery, search: &SearchConfig) -> Result<SearchParams> {
    let zip = match &query.zip {
        None => search.default_zip.clone(),
        Some(raw) => raw.chars().take(5).collect(),
    };
    if zip.is_empty() {
        return Err(ShelterSeekError::validation("Invalid ZIP. Please try again."));
    }

    let radius_miles = match query.radius.as_deref() {
        None | Some("") => search.default_radius_miles,
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            ShelterSeekError::validation("Invalid radius. Please try again.")
        })?,
    };
    if radius_miles < search.min_radius_miles || radius_miles > search.max_radius_miles {
        return Err(ShelterSeekError::validation(format!(
            "Radius can't be less than {} or greater than {}. Please try again.",
            search.min_radius_miles, search.max_radius_miles
        )));
    }

    Ok(SearchParams { zip, radius_miles })
}
