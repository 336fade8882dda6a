//! Search errors.

use thiserror::Error;

/// Errors returned by the search clients.
#[derive(Error, Debug)]
pub enum SearchError {
    /// No API key configured for the service.
    #[error("{0} API key not found")]
    MissingKey(&'static str),

    /// The HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{service} returned {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    /// The response body did not have the expected shape.
    #[error("invalid {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The page URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The chat completion behind a web search failed.
    #[error("web search failed: {0}")]
    Completion(String),
}
