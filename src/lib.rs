//! `ShelterSeek` - community animal shelter directory
//!
//! This library provides the core functionality for locating animal
//! shelters near a ZIP code: ZIP radius search over a static reference
//! dataset, location normalization and validation, and the directory
//! store and HTTP API built on top of them.

pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod store;
pub mod web;

// Re-export core types for public API
pub use config::ShelterSeekConfig;
pub use error::ShelterSeekError;
pub use geo::{LocationCandidate, LocationResolver, ZipDatabase, ZipGeoLookup};
pub use models::{Comment, Location, Shelter};
pub use store::{DirectoryStore, ShelterDraft};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ShelterSeekError>;
