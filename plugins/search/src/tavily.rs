//! Tavily web search.

use crate::{Result, SearchError};
use llm::Client;
use serde::{Deserialize, Serialize};

const ENDPOINT: &str = "https://api.tavily.com/search";

/// One Tavily search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TavilyResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

/// Tavily search client.
#[derive(Clone)]
pub struct Tavily {
    client: Client,
    key: String,
    max_results: usize,
}

impl Tavily {
    /// Create a client, failing when the key is empty.
    pub fn new(client: Client, key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(SearchError::MissingKey("Tavily"));
        }
        Ok(Self {
            client,
            key: key.to_owned(),
            max_results: 3,
        })
    }

    /// Set the number of results per query.
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Search the web.
    pub async fn search(&self, query: &str) -> Result<Vec<TavilyResult>> {
        tracing::debug!("tavily search: {query}");
        let response = self
            .client
            .post(ENDPOINT)
            .json(&TavilyRequest {
                api_key: &self.key,
                query,
                max_results: self.max_results,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                service: "Tavily",
                status,
            });
        }

        let body = response.text().await?;
        decode(&body)
    }

    /// Search and render the hits as a JSON array for a model.
    pub async fn search_json(&self, query: &str) -> Result<String> {
        let results = self.search(query).await?;
        serde_json::to_string(&results).map_err(|source| SearchError::Decode {
            service: "Tavily",
            source,
        })
    }
}

fn decode(body: &str) -> Result<Vec<TavilyResult>> {
    serde_json::from_str::<TavilyResponse>(body)
        .map(|r| r.results)
        .map_err(|source| SearchError::Decode {
            service: "Tavily",
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_results() {
        let body = r#"{
            "query": "weather in sf",
            "results": [
                {"title": "SF Weather", "url": "https://example.com", "content": "Sunny, 20C", "score": 0.91, "raw_content": null}
            ],
            "response_time": 1.2
        }"#;
        let results = decode(body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "SF Weather");
        assert_eq!(results[0].score, 0.91);
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = Tavily::new(Client::new(), "").err().unwrap();
        assert_eq!(err.to_string(), "Tavily API key not found");
    }
}
