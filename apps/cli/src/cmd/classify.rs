//! Structured output: tag a passage.

use crate::session::Session;
use agent::Template;
use anyhow::Result;
use clap::Args;
use llm::Message;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

const TAGGING: &str = include_str!("../../prompts/tagging.md");

/// Tag text with sentiment, aggressiveness and language.
#[derive(Args, Debug)]
pub struct Classify {
    /// The passage to tag.
    pub text: String,

    /// Constrain the tags to fixed sentiments, languages and a 1-5 scale.
    #[arg(long)]
    pub strict: bool,
}

/// Tags extracted from a passage.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    /// The sentiment of the text
    pub sentiment: String,
    /// How aggressive the text is on a scale from 1 to 10
    #[schemars(range(min = 1, max = 10))]
    pub aggressiveness: u8,
    /// The language the text is written in
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Happy,
    Neutral,
    Sad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Spanish,
    English,
    French,
    German,
    Italian,
    Portuguese,
}

/// Tags restricted to closed sets.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StrictClassification {
    pub sentiment: Sentiment,
    /// Describes how aggressive the statement is, the higher the number the
    /// more aggressive
    #[schemars(range(min = 1, max = 5))]
    pub aggressiveness: u8,
    /// The language the text is written in
    pub language: Language,
}

impl Classify {
    pub async fn run(self, session: &Session) -> Result<()> {
        if self.strict {
            self.tag::<StrictClassification>(session).await
        } else {
            self.tag::<Classification>(session).await
        }
    }

    async fn tag<T>(&self, session: &Session) -> Result<()>
    where
        T: JsonSchema + DeserializeOwned + Serialize,
    {
        let prompt = Template::new(TAGGING)?.format(&[("input", self.text.as_str())])?;
        let tags: T = runtime::extract(
            &session.provider()?,
            session.general_at(0.0),
            "extractor",
            &[Message::user(prompt)],
        )
        .await?;
        println!("{}", serde_json::to_string_pretty(&tags)?);
        Ok(())
    }
}
