//! Search clients used as agent tools.
//!
//! - [`Tavily`]: web search API.
//! - [`Farcaster`]: Neynar cast search.
//! - [`WebSearch`]: OpenAI search-preview chat completions.
//! - [`load_page`]: fetch a page and keep its paragraph text.

pub use error::SearchError;
pub use farcaster::{Cast, Farcaster, render as render_casts};
pub use loader::{load_page, paragraphs};
pub use tavily::{Tavily, TavilyResult};
pub use web::WebSearch;

mod error;
mod farcaster;
mod loader;
mod tavily;
mod web;

/// Result alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
