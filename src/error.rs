//! Error types for storage-sentinel
//!
//! Provides structured error types for all advisor components including
//! the inventory repository, decision engines, and the REST surface.

use thiserror::Error;

/// Unified error type for the advisor
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Identity Lookup Errors
    // =========================================================================
    #[error("Drive not found: {id}")]
    DriveNotFound { id: String },

    #[error("File not found: {id}")]
    FileNotFound { id: String },

    #[error("Alert not found: {id}")]
    AlertNotFound { id: String },

    // =========================================================================
    // API Errors
    // =========================================================================
    #[error("API request validation failed: {0}")]
    ApiValidation(String),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check whether this error is an identity-lookup miss.
    ///
    /// Lookup misses are terminal for the request: the REST layer maps
    /// them to 404 and no retry is attempted.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::DriveNotFound { .. } | Error::FileNotFound { .. } | Error::AlertNotFound { .. }
        )
    }

    /// Check whether this error is a caller-side validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::ApiValidation(_) | Error::Configuration(_))
    }
}

/// Result type alias for the advisor
pub type Result<T> = std::result::Result<T, Error>;
