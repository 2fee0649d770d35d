//! Chat-completions client for OpenAI-compatible endpoints.
//!
//! OpenAI, Gemini (through its OpenAI compatibility layer) and a local
//! Ollama server all accept the same request shape, so one client covers
//! every supported provider.

use crate::error::{OutreachError, Result};
use crate::TextGenerator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Sampling temperature: some variety between letters.
const TEMPERATURE: f32 = 0.7;
/// Upper bound on the length of one letter.
const MAX_TOKENS: u32 = 500;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Gemini,
    Ollama,
}

impl AiProvider {
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "https://api.openai.com/v1",
            AiProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            AiProvider::Ollama => "http://localhost:11434/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "gpt-4o-mini",
            AiProvider::Gemini => "gemini-2.5-flash",
            AiProvider::Ollama => "gemma3:12b",
        }
    }

    /// Whether requests need a real API key.
    pub fn requires_key(&self) -> bool {
        !matches!(self, AiProvider::Ollama)
    }
}

impl FromStr for AiProvider {
    type Err = OutreachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAi),
            "gemini" => Ok(AiProvider::Gemini),
            "ollama" => Ok(AiProvider::Ollama),
            other => Err(OutreachError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AiProvider::OpenAi => "openai",
            AiProvider::Gemini => "gemini",
            AiProvider::Ollama => "ollama",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatClient {
    /// Create a client for `provider`, using its default endpoint.
    ///
    /// `model` falls back to the provider's default when `None` or blank.
    pub fn new(provider: AiProvider, api_key: impl Into<String>, model: Option<String>) -> Result<Self> {
        let api_key = api_key.into();
        if provider.requires_key() && api_key.trim().is_empty() {
            return Err(OutreachError::MissingApiKey {
                provider: provider.to_string(),
            });
        }

        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: provider.default_endpoint().to_string(),
            model,
            api_key,
        })
    }

    /// Point the client at a different OpenAI-compatible base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system".into(), content: system.into() },
                ChatMessage { role: "user".into(), content: user.into() },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!("Requesting completion from {} ({})", self.endpoint, self.model);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OutreachError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(OutreachError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("OpenAI".parse::<AiProvider>().unwrap(), AiProvider::OpenAi);
        assert_eq!(" gemini ".parse::<AiProvider>().unwrap(), AiProvider::Gemini);
        assert_eq!("ollama".parse::<AiProvider>().unwrap(), AiProvider::Ollama);
        assert!(matches!(
            "claude".parse::<AiProvider>(),
            Err(OutreachError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let client = ChatClient::new(AiProvider::Gemini, "key", None).unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash");
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/openai"
        );

        let client = ChatClient::new(AiProvider::OpenAi, "key", Some("gpt-4o".into())).unwrap();
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn test_key_required_except_for_ollama() {
        assert!(matches!(
            ChatClient::new(AiProvider::OpenAi, "  ", None),
            Err(OutreachError::MissingApiKey { .. })
        ));
        assert!(ChatClient::new(AiProvider::Ollama, "", None).is_ok());
    }
}
