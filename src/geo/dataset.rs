//! ZIP reference dataset
//!
//! Loads the static table mapping ZIP codes to city, state, and
//! geocoordinates, and exposes it as an immutable in-memory index.
//! The table is read once at startup and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A single entry in the ZIP reference table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZipRecord {
    /// 5-digit ZIP code
    pub zip: String,
    /// USPS city name
    pub city: String,
    /// 2-letter state code
    pub state: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Immutable ZIP reference table indexed by ZIP code
#[derive(Debug)]
pub struct ZipDatabase {
    records: HashMap<String, ZipRecord>,
}

impl ZipDatabase {
    /// Build an index from a list of reference records
    ///
    /// Later records win when a ZIP appears twice in the input.
    #[must_use]
    pub fn from_records(records: Vec<ZipRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.zip.clone(), record))
            .collect::<HashMap<_, _>>();
        debug!("Indexed {} ZIP reference records", records.len());
        Self { records }
    }

    /// Parse a JSON array of reference records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<ZipRecord> =
            serde_json::from_str(json).with_context(|| "Failed to parse ZIP reference JSON")?;
        Ok(Self::from_records(records))
    }

    /// Read a JSON reference file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading ZIP reference dataset from {}", path.display());
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ZIP reference file: {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Load the dataset shipped with the crate
    ///
    /// The bundled table is a curated subset of the US ZIP directory,
    /// enough for the default deployment; point `dataset.path` at a fuller
    /// file to widen coverage.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(include_str!("../../data/zip_reference.json"))
    }

    /// Look up the reference record for a ZIP code
    #[must_use]
    pub fn get(&self, zip: &str) -> Option<&ZipRecord> {
        self.records.get(zip)
    }

    /// Iterate over all reference records
    pub fn records(&self) -> impl Iterator<Item = &ZipRecord> {
        self.records.values()
    }

    /// Number of reference records in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Great-circle distance between two reference records in miles
#[must_use]
pub fn distance_miles(from: &ZipRecord, to: &ZipRecord) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Miles,
    )
}
