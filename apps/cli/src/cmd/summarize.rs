//! Stuff a page's paragraphs into one summarization prompt.

use crate::session::Session;
use agent::Template;
use anyhow::{Context, Result};
use clap::Args;
use llm::{LLM, Message};
use openai::Request;

const URL: &str = "https://lilianweng.github.io/posts/2023-06-23-agent/";

/// Summarize the main theme of a web page.
#[derive(Args, Debug)]
pub struct Summarize {
    /// Page to load.
    #[arg(default_value = URL)]
    pub url: String,
}

impl Summarize {
    pub async fn run(self, session: &Session) -> Result<()> {
        let context = search::load_page(session.client(), &self.url)
            .await
            .with_context(|| format!("failed to load {}", self.url))?;
        tracing::debug!("loaded {} bytes of paragraph text", context.len());

        let prompt = Template::new("Summarize the main theme in these retrieved docs: {context}")?
            .format(&[("context", context.as_str())])?;
        let request = Request::from(session.general_at(0.0));
        let response = session
            .provider()?
            .send(&request, &[Message::user(prompt)])
            .await?;
        println!("{}", response.content().cloned().unwrap_or_default());
        Ok(())
    }
}
