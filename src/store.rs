//! In-memory directory store
//!
//! Holds the Location, Shelter, and Comment records behind a read-write
//! lock. Location creation is gated by reference-dataset validation: a
//! shelter can only introduce a new (city, state) pair when the submitted
//! ZIP agrees with it. Deleting a shelter cascades to its comments.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::Result;
use crate::error::ShelterSeekError;
use crate::geo::{LocationCandidate, LocationResolver, normalize_city, normalize_state};
use crate::models::{Comment, Location, Shelter};

/// Submitted shelter fields, validated by the form layer
#[derive(Debug, Clone)]
pub struct ShelterDraft {
    pub name: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub max_capacity: u32,
    pub photo: String,
    pub owner: String,
}

#[derive(Default)]
struct StoreInner {
    locations: HashMap<u64, Location>,
    shelters: HashMap<u64, Shelter>,
    comments: HashMap<u64, Comment>,
    next_location_id: u64,
    next_shelter_id: u64,
    next_comment_id: u64,
}

/// Shared in-memory store for the directory's records
pub struct DirectoryStore {
    resolver: LocationResolver,
    inner: RwLock<StoreInner>,
}

impl DirectoryStore {
    /// Create an empty store gated by the given resolver
    #[must_use]
    pub fn new(resolver: LocationResolver) -> Self {
        Self {
            resolver,
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// The resolver this store validates locations against
    #[must_use]
    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().expect("store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().expect("store lock poisoned")
    }

    // Locations

    /// Find a stored location by (city, state), normalizing the input first
    #[must_use]
    pub fn find_location(&self, city: &str, state: &str) -> Option<Location> {
        let city = normalize_city(city);
        let state = normalize_state(state);
        self.read()
            .locations
            .values()
            .find(|location| location.city == city && location.state == state)
            .cloned()
    }

    /// Stored locations matching any of the resolved candidates
    #[must_use]
    pub fn locations_matching(&self, candidates: &[LocationCandidate]) -> Vec<Location> {
        let inner = self.read();
        let mut matches: Vec<Location> = inner
            .locations
            .values()
            .filter(|location| {
                candidates
                    .iter()
                    .any(|candidate| {
                        candidate.city == location.city && candidate.state == location.state
                    })
            })
            .cloned()
            .collect();
        matches.sort_by_key(|location| location.id);
        matches
    }

    /// Find the location for a (city, state) pair, creating it when the
    /// submitted ZIP validates the pair against the reference dataset
    ///
    /// "ZIP valid but city unknown" and "city/state typo" both fail the
    /// same dataset check and surface the same message.
    pub fn find_or_create_location(
        &self,
        city: &str,
        state: &str,
        zip: &str,
    ) -> Result<Location> {
        let city = normalize_city(city);
        let state = normalize_state(state);

        let mut inner = self.write();
        if let Some(location) = inner
            .locations
            .values()
            .find(|location| location.city == city && location.state == state)
        {
            return Ok(location.clone());
        }

        if !self.resolver.valid_city_state_zip(&city, &state, zip) {
            debug!("Rejected location candidate {city}, {state} for ZIP {zip:?}");
            return Err(ShelterSeekError::unknown_location(
                "City, state, and ZIP do not match. Please try again.",
            ));
        }

        inner.next_location_id += 1;
        let location = Location::new(inner.next_location_id, city, state);
        info!("Created location {}", location);
        inner.locations.insert(location.id, location.clone());
        Ok(location)
    }

    // Shelters

    /// Fetch a shelter by id
    pub fn get_shelter(&self, id: u64) -> Result<Shelter> {
        self.read()
            .shelters
            .get(&id)
            .cloned()
            .ok_or_else(|| ShelterSeekError::not_found(format!("No shelter with id {id}")))
    }

    /// Shelters listed under any of the given location ids, ordered by id
    #[must_use]
    pub fn shelters_in_locations(&self, location_ids: &[u64]) -> Vec<Shelter> {
        let inner = self.read();
        let mut shelters: Vec<Shelter> = inner
            .shelters
            .values()
            .filter(|shelter| location_ids.contains(&shelter.location_id))
            .cloned()
            .collect();
        shelters.sort_by_key(|shelter| shelter.id);
        shelters
    }

    /// Create a shelter, introducing its location if necessary
    pub fn create_shelter(&self, draft: ShelterDraft) -> Result<Shelter> {
        let location = self.find_or_create_location(&draft.city, &draft.state, &draft.zip)?;

        let mut inner = self.write();
        inner.next_shelter_id += 1;
        let shelter = Shelter {
            id: inner.next_shelter_id,
            name: draft.name,
            street_addr: draft.street_addr,
            location_id: location.id,
            zip: draft.zip,
            max_capacity: draft.max_capacity,
            current_capacity: 0,
            photo: draft.photo,
            owner: draft.owner,
        };
        info!("Created shelter {} ({})", shelter.id, shelter.name);
        inner.shelters.insert(shelter.id, shelter.clone());
        Ok(shelter)
    }

    /// Update a shelter's listing fields
    ///
    /// Owner and current capacity are not form-editable and survive the
    /// update unchanged.
    pub fn update_shelter(&self, id: u64, draft: ShelterDraft) -> Result<Shelter> {
        // Confirm existence before introducing a location for the update
        let existing = self.get_shelter(id)?;
        let location = self.find_or_create_location(&draft.city, &draft.state, &draft.zip)?;

        let mut inner = self.write();
        let shelter = Shelter {
            id,
            name: draft.name,
            street_addr: draft.street_addr,
            location_id: location.id,
            zip: draft.zip,
            max_capacity: draft.max_capacity,
            current_capacity: existing.current_capacity,
            photo: draft.photo,
            owner: existing.owner,
        };
        info!("Updated shelter {} ({})", shelter.id, shelter.name);
        inner.shelters.insert(id, shelter.clone());
        Ok(shelter)
    }

    /// Delete a shelter and every comment attached to it
    pub fn delete_shelter(&self, id: u64) -> Result<()> {
        let mut inner = self.write();
        if inner.shelters.remove(&id).is_none() {
            return Err(ShelterSeekError::not_found(format!(
                "No shelter with id {id}"
            )));
        }
        inner.comments.retain(|_, comment| comment.shelter_id != id);
        info!("Deleted shelter {id} and its comments");
        Ok(())
    }

    // Comments

    /// Attach a comment to a shelter
    pub fn create_comment(&self, shelter_id: u64, author: String, content: String) -> Result<Comment> {
        let mut inner = self.write();
        if !inner.shelters.contains_key(&shelter_id) {
            return Err(ShelterSeekError::not_found(format!(
                "No shelter with id {shelter_id}"
            )));
        }
        inner.next_comment_id += 1;
        let comment = Comment {
            id: inner.next_comment_id,
            author,
            content,
            shelter_id,
        };
        inner.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    /// Fetch a comment by id
    pub fn get_comment(&self, id: u64) -> Result<Comment> {
        self.read()
            .comments
            .get(&id)
            .cloned()
            .ok_or_else(|| ShelterSeekError::not_found(format!("No comment with id {id}")))
    }

    /// Replace a comment's body
    pub fn update_comment(&self, id: u64, content: String) -> Result<Comment> {
        let mut inner = self.write();
        let comment = inner
            .comments
            .get_mut(&id)
            .ok_or_else(|| ShelterSeekError::not_found(format!("No comment with id {id}")))?;
        comment.content = content;
        Ok(comment.clone())
    }

    /// Delete a comment
    pub fn delete_comment(&self, id: u64) -> Result<()> {
        let mut inner = self.write();
        if inner.comments.remove(&id).is_none() {
            return Err(ShelterSeekError::not_found(format!(
                "No comment with id {id}"
            )));
        }
        Ok(())
    }

    /// Comments attached to a shelter, ordered by id
    pub fn comments_for_shelter(&self, shelter_id: u64) -> Result<Vec<Comment>> {
        let inner = self.read();
        if !inner.shelters.contains_key(&shelter_id) {
            return Err(ShelterSeekError::not_found(format!(
                "No shelter with id {shelter_id}"
            )));
        }
        let mut comments: Vec<Comment> = inner
            .comments
            .values()
            .filter(|comment| comment.shelter_id == shelter_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.id);
        Ok(comments)
    }
}
