//! ZIP geo-lookup adapter
//!
//! Wraps the reference dataset behind the three operations the rest of
//! the directory needs: ZIP validity, city/state lookup, and radius
//! expansion. The adapter is constructed with its dataset, cheap to
//! clone, and holds no mutable state.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::dataset::{ZipDatabase, ZipRecord, distance_miles};

/// Failures produced by radius expansion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeoLookupError {
    /// The supplied ZIP is not a 5-digit numeric string
    #[error("Malformed ZIP code: {0:?}")]
    MalformedZip(String),

    /// The supplied ZIP is well-formed but absent from the reference dataset
    #[error("ZIP code {0} is not in the reference dataset")]
    UnknownZip(String),
}

/// Read-only geo-lookup over the ZIP reference dataset
#[derive(Debug, Clone)]
pub struct ZipGeoLookup {
    db: Arc<ZipDatabase>,
}

impl ZipGeoLookup {
    /// Create a lookup adapter over the given dataset
    #[must_use]
    pub fn new(db: Arc<ZipDatabase>) -> Self {
        Self { db }
    }

    /// Whether a string names a real ZIP code
    ///
    /// A ZIP is real when it is a 5-digit numeric string AND present in
    /// the reference dataset. Malformed input returns false, never panics.
    #[must_use]
    pub fn is_real_zip(&self, zip: &str) -> bool {
        is_valid_zip_format(zip) && self.db.get(zip).is_some()
    }

    /// Reference record for a known ZIP, `None` otherwise
    #[must_use]
    pub fn lookup(&self, zip: &str) -> Option<&ZipRecord> {
        self.db.get(zip)
    }

    /// ZIP codes whose coordinates fall within `radius_miles` of the origin
    ///
    /// The origin ZIP is included in the result. Order is not significant.
    pub fn zips_within_radius(
        &self,
        zip: &str,
        radius_miles: u32,
    ) -> Result<Vec<String>, GeoLookupError> {
        if !is_valid_zip_format(zip) {
            return Err(GeoLookupError::MalformedZip(zip.to_string()));
        }
        let origin = self
            .db
            .get(zip)
            .ok_or_else(|| GeoLookupError::UnknownZip(zip.to_string()))?;

        let radius = f64::from(radius_miles);
        let zips: Vec<String> = self
            .db
            .records()
            .filter(|record| distance_miles(origin, record) <= radius)
            .map(|record| record.zip.clone())
            .collect();

        debug!(
            "Radius expansion of {} at {} miles matched {} ZIP codes",
            zip,
            radius_miles,
            zips.len()
        );
        Ok(zips)
    }
}

/// Five ASCII digits
fn is_valid_zip_format(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|byte| byte.is_ascii_digit())
}
