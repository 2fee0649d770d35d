//! Cover letter generation through a large language model.
//!
//! This crate provides:
//! - `TextGenerator`, the seam between prompt building and the model
//! - `ChatClient`, an OpenAI-compatible chat-completions client
//! - `CoverLetterGenerator`, which renders prompts from a job and a profile
//!   and fills in letters for a batch of jobs with rate limiting

pub mod client;
pub mod error;
pub mod generator;
pub mod prompts;

pub use client::{AiProvider, ChatClient};
pub use error::{OutreachError, Result};
pub use generator::CoverLetterGenerator;

use async_trait::async_trait;

/// A model that turns a system and a user message into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
