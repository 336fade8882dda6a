//! Web search through an OpenAI search-preview model.

use crate::{Result, SearchError};
use llm::{Client, General, LLM, Message};
use openai::{OpenAI, Request};

const MODEL: &str = "gpt-4o-search-preview";

const PROMPT: &str = "You are an expert researcher and content curator. Your task is to perform a thorough web search and provide a comprehensive overview of the selected topic.

Please gather information on the following aspects:
- Core concepts and a clear, concise definition of the topic.
- Key historical milestones and a timeline of important events.
- Influential people, organizations, or projects associated with it.
- The current state and recent developments.
- Common criticisms or controversies.
- Related technologies or concepts.

Please structure the output in a clear, easy-to-digest format.";

/// A web search backed by a chat completion with web access.
#[derive(Clone)]
pub struct WebSearch {
    provider: OpenAI,
    request: Request,
}

impl WebSearch {
    /// Create a search client for the OpenAI API.
    pub fn new(client: Client, key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(SearchError::MissingKey("OpenAI"));
        }
        let provider =
            OpenAI::api(client, key).map_err(|e| SearchError::Completion(e.to_string()))?;
        Ok(Self::with_provider(provider))
    }

    /// Use an existing provider, e.g. one pointed at a proxy.
    pub fn with_provider(provider: OpenAI) -> Self {
        Self {
            provider,
            request: Request::from(General::new(MODEL)).web_search("high"),
        }
    }

    /// The request sent for every search.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Search the web and return `Search results: {answer}`.
    pub async fn search(&self, query: &str) -> Result<String> {
        tracing::info!("using web search tool for: {query}");
        let messages = [Message::system(PROMPT), Message::user(query)];
        let response = self
            .provider
            .send(&self.request, &messages)
            .await
            .map_err(|e| SearchError::Completion(e.to_string()))?;
        let content = response.content().cloned().unwrap_or_default();
        Ok(format!("Search results: {content}"))
    }
}
