//! Error types for cover letter generation.

use thiserror::Error;

/// Errors that can occur when talking to the language model
#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Request to language model failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Language model API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Language model returned an empty response")]
    EmptyResponse,

    #[error("No API key configured for provider '{provider}'")]
    MissingApiKey { provider: String },

    #[error("Unknown AI provider '{0}' (expected openai, gemini or ollama)")]
    UnknownProvider(String),
}

pub type Result<T> = std::result::Result<T, OutreachError>;
