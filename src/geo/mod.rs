//! ZIP geo-lookup and location resolution
//!
//! This module provides the geographic core of the directory:
//! - Dataset: the static ZIP-to-city/state/coordinate reference table
//! - Lookup: ZIP validity checks and radius expansion over the table
//! - Resolver: normalization, deduplication, and city/state/ZIP validation

pub mod dataset;
pub mod lookup;
pub mod resolver;

// Re-export commonly used types from submodules
pub use dataset::{ZipDatabase, ZipRecord, distance_miles};
pub use lookup::{GeoLookupError, ZipGeoLookup};
pub use resolver::{LocationCandidate, LocationResolver, normalize_city, normalize_state};
