//! OpenAI-compatible LLM provider.
//!
//! Covers OpenAI, Groq, DeepSeek, Ollama, and any other service exposing
//! the OpenAI chat completions API.

use llm::reqwest::{
    Client,
    header::{self, HeaderMap},
};
pub use request::Request;

mod provider;
mod request;
mod sse;

/// OpenAI-compatible endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
    /// Groq chat completions.
    pub const GROQ: &str = "https://api.groq.com/openai/v1/chat/completions";
    /// DeepSeek chat completions.
    pub const DEEPSEEK: &str = "https://api.deepseek.com/chat/completions";
    /// Ollama local chat completions.
    pub const OLLAMA: &str = "http://localhost:11434/v1/chat/completions";
}

/// An OpenAI-compatible LLM provider.
#[derive(Clone)]
pub struct OpenAI {
    /// The HTTP client.
    pub client: Client,
    /// Request headers (authorization, content-type).
    headers: HeaderMap,
    /// Chat completions endpoint URL.
    endpoint: String,
}

impl OpenAI {
    /// Create a provider targeting the OpenAI API.
    pub fn api(client: Client, key: &str) -> anyhow::Result<Self> {
        Self::custom(client, key, endpoint::OPENAI)
    }

    /// Create a provider targeting the Groq API.
    pub fn groq(client: Client, key: &str) -> anyhow::Result<Self> {
        Self::custom(client, key, endpoint::GROQ)
    }

    /// Create a provider targeting the DeepSeek API.
    pub fn deepseek(client: Client, key: &str) -> anyhow::Result<Self> {
        Self::custom(client, key, endpoint::DEEPSEEK)
    }

    /// Create a provider targeting a local Ollama instance (no API key).
    pub fn ollama(client: Client) -> anyhow::Result<Self> {
        Self::with_headers(client, json_headers()?, endpoint::OLLAMA)
    }

    /// Create a provider targeting a custom OpenAI-compatible endpoint.
    ///
    /// An empty key sends no authorization header.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> anyhow::Result<Self> {
        let mut headers = json_headers()?;
        if !key.is_empty() {
            headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        }
        Self::with_headers(client, headers, endpoint)
    }

    fn with_headers(client: Client, headers: HeaderMap, endpoint: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// The chat completions endpoint this provider posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn json_headers() -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, "application/json".parse()?);
    headers.insert(header::ACCEPT, "application/json".parse()?);
    Ok(headers)
}
