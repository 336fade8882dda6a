//! Farcaster cast search through the Neynar API.

use crate::{Result, SearchError};
use llm::Client;
use serde::{Deserialize, Serialize};

const ENDPOINT: &str = "https://api.neynar.com/v2/farcaster/cast/search";
const LIMIT: usize = 15;

/// A cast reduced to what an analyst needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cast {
    pub hash: String,
    pub author_name: String,
    pub text: String,
    pub timestamp: String,
    pub likes: u64,
    pub replies: u64,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: SearchResult,
}

#[derive(Deserialize)]
struct SearchResult {
    casts: Vec<RawCast>,
}

#[derive(Deserialize)]
struct RawCast {
    hash: String,
    author: Author,
    text: String,
    timestamp: String,
    reactions: Reactions,
    replies: Replies,
}

#[derive(Deserialize)]
struct Author {
    display_name: String,
}

#[derive(Deserialize)]
struct Reactions {
    likes_count: u64,
}

#[derive(Deserialize)]
struct Replies {
    count: u64,
}

impl From<RawCast> for Cast {
    fn from(raw: RawCast) -> Self {
        Self {
            hash: raw.hash,
            author_name: raw.author.display_name,
            text: raw.text,
            timestamp: raw.timestamp,
            likes: raw.reactions.likes_count,
            replies: raw.replies.count,
        }
    }
}

/// Neynar cast search client.
#[derive(Clone)]
pub struct Farcaster {
    client: Client,
    key: String,
}

impl Farcaster {
    /// Create a client, failing when the key is empty.
    pub fn new(client: Client, key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(SearchError::MissingKey("Neynar"));
        }
        Ok(Self {
            client,
            key: key.to_owned(),
        })
    }

    /// Search casts matching `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<Cast>> {
        tracing::debug!("farcaster search: {query}");
        let limit = LIMIT.to_string();
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[("q", query), ("limit", limit.as_str())])
            .header("accept", "application/json")
            .header("x-api-key", &self.key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                service: "Neynar",
                status,
            });
        }

        decode(&response.text().await?)
    }

    /// Search casts about an Ethereum contract.
    pub async fn contract(&self, address: &str) -> Result<Vec<Cast>> {
        self.search(&format!("ethereum contract {address}")).await
    }
}

/// Render casts as `{"casts": [...], "count": n}`.
pub fn render(casts: &[Cast]) -> String {
    serde_json::json!({ "casts": casts, "count": casts.len() }).to_string()
}

fn decode(body: &str) -> Result<Vec<Cast>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|source| SearchError::Decode {
            service: "Neynar",
            source,
        })?;
    Ok(response.result.casts.into_iter().map(Cast::from).collect())
}
