//! Error types and handling for the `ShelterSeek` application

use thiserror::Error;

/// Main error type for the `ShelterSeek` application
#[derive(Error, Debug)]
pub enum ShelterSeekError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A requested record does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A (city, state, ZIP) triple failed reference-dataset validation
    #[error("Unknown location: {message}")]
    UnknownLocation { message: String },

    /// ZIP reference dataset errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ShelterSeekError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new unknown-location error
    pub fn unknown_location<S: Into<String>>(message: S) -> Self {
        Self::UnknownLocation {
            message: message.into(),
        }
    }

    /// Create a new dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ShelterSeekError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            ShelterSeekError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ShelterSeekError::NotFound { message } => message.clone(),
            ShelterSeekError::UnknownLocation { message } => message.clone(),
            ShelterSeekError::Dataset { .. } => {
                "The ZIP reference dataset could not be loaded.".to_string()
            }
            ShelterSeekError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ShelterSeekError::config("missing dataset path");
        assert!(matches!(config_err, ShelterSeekError::Config { .. }));

        let validation_err = ShelterSeekError::validation("radius out of range");
        assert!(matches!(validation_err, ShelterSeekError::Validation { .. }));

        let not_found_err = ShelterSeekError::not_found("no shelter with id 7");
        assert!(matches!(not_found_err, ShelterSeekError::NotFound { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ShelterSeekError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = ShelterSeekError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let location_err = ShelterSeekError::unknown_location("City, state, and ZIP do not match.");
        assert!(location_err.user_message().contains("do not match"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let seek_err: ShelterSeekError = io_err.into();
        assert!(matches!(seek_err, ShelterSeekError::Io { .. }));
    }
}
