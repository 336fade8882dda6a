//! Prompt templates: translate text into another language.

use crate::session::Session;
use agent::ChatPrompt;
use anyhow::Result;
use clap::Args;
use llm::{LLM, Role};
use openai::Request;

/// Translate text from English.
#[derive(Args, Debug)]
pub struct Translate {
    /// Text to translate.
    pub text: String,

    /// Target language.
    #[arg(long, default_value = "Brazilian Portuguese")]
    pub language: String,
}

impl Translate {
    pub async fn run(self, session: &Session) -> Result<()> {
        let prompt = ChatPrompt::from_messages(&[
            (Role::System, "Translate the following from English into {language}"),
            (Role::User, "{text}"),
        ])?;
        let messages = prompt.format(&[
            ("language", self.language.as_str()),
            ("text", self.text.as_str()),
        ])?;

        let request = Request::from(session.general());
        let response = session.provider()?.send(&request, &messages).await?;
        println!("{}", response.content().cloned().unwrap_or_default());
        Ok(())
    }
}
