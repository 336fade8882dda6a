//! Structured output: extract people mentioned in text.

use crate::session::Session;
use agent::ChatPrompt;
use anyhow::Result;
use clap::Args;
use llm::Role;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const EXTRACTION: &str = include_str!("../../prompts/extraction.md");

/// Extract people from text.
#[derive(Args, Debug)]
pub struct Extract {
    /// Text mentioning people.
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Person {
    /// The name of the person
    pub name: Option<String>,
    /// The color of the person's hair if known
    pub hair_color: Option<String>,
    /// Height measured in meters
    pub height_in_meters: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct People {
    /// Extracted data about people.
    pub people: Vec<Person>,
}

impl Extract {
    pub async fn run(self, session: &Session) -> Result<()> {
        let prompt =
            ChatPrompt::from_messages(&[(Role::System, EXTRACTION), (Role::User, "{text}")])?;
        let messages = prompt.format(&[("text", self.text.as_str())])?;

        let people: People = runtime::extract(
            &session.provider()?,
            session.general_at(0.0),
            "people",
            &messages,
        )
        .await?;
        println!("{}", serde_json::to_string_pretty(&people)?);
        Ok(())
    }
}
