//! Web search tools.

use llm::{LLM, Tool};
use runtime::Runtime;
use schemars::JsonSchema;
use search::{Tavily, WebSearch};
use serde::Deserialize;
use std::sync::Arc;

pub const TAVILY: &str = "tavily_search_results_json";
pub const WEB_SEARCH: &str = "web_search";

#[derive(Deserialize, JsonSchema)]
struct SearchArgs {
    /// search terms
    query: String,
}

/// Register Tavily as `tavily_search_results_json`.
pub fn register_tavily<P: LLM>(runtime: &mut Runtime<P>, tavily: Tavily) {
    let tavily = Arc::new(tavily);
    runtime.register(
        Tool::new::<SearchArgs>(
            TAVILY,
            "A search engine optimized for comprehensive, accurate, and trusted results. \
             Useful for when you need to answer questions about current events. \
             Input should be a search query.",
        ),
        move |args| {
            let tavily = tavily.clone();
            async move {
                let query = match crate::parse::<SearchArgs>(&args) {
                    Ok(a) => a.query,
                    Err(e) => return e,
                };
                tavily
                    .search_json(&query)
                    .await
                    .unwrap_or_else(|e| format!("Error searching Tavily: {e}"))
            }
        },
    );
}

/// Register the search-preview model as `web_search`.
pub fn register_web<P: LLM>(runtime: &mut Runtime<P>, web: WebSearch) {
    let web = Arc::new(web);
    runtime.register(
        Tool::new::<SearchArgs>(WEB_SEARCH, "Search the web using gpt-4o-search-preview"),
        move |args| {
            let web = web.clone();
            async move {
                let query = match crate::parse::<SearchArgs>(&args) {
                    Ok(a) => a.query,
                    Err(e) => return e,
                };
                web.search(&query)
                    .await
                    .unwrap_or_else(|e| format!("Error performing web search: {e}"))
            }
        },
    );
}
