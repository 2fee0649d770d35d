//! Error types for the crawler.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport failure talking to the marketplace
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The marketplace answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A CSS selector in the extraction schema does not parse
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Listing(#[from] listings::ListingError),
}

pub type Result<T> = std::result::Result<T, SourceError>;
