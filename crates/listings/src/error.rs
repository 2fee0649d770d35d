//! Error types for the listings crate.
//!
//! Only construction and loading can fail. Parsing of free-form marketplace
//! text (budgets, posted times) never produces an error; it degrades to
//! an unknown value instead.

use thiserror::Error;

/// Errors that can occur while building job records or loading profiles.
#[derive(Error, Debug)]
pub enum ListingError {
    /// A job record was produced without a URL
    #[error("Job listing has no URL")]
    MissingUrl,

    /// The job URL could not be parsed
    #[error("Invalid job URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Profile file could not be found
    #[error("Profile file not found: {path}")]
    ProfileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON payload could not be decoded
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML payload could not be decoded
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A configuration value was out of range or inconsistent
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ListingError>;
