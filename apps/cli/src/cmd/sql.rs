//! Question answering over SQL: write a query, run it, answer in a
//! sentence.

use crate::session::Session;
use agent::ChatPrompt;
use anyhow::{Context, Result, bail};
use clap::Args;
use llm::{LLM, Message, Role};
use openai::Request;
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::PathBuf;
use tools::Database;

const QUERY_PROMPT: &str = include_str!("../../prompts/sql_query.md");
const TOP_K: usize = 10;

/// Ask a question about a SQLite database.
#[derive(Args, Debug)]
pub struct Sql {
    /// The question.
    #[arg(default_value = "How many employees are there?")]
    pub question: String,

    /// Database file.
    #[arg(long, default_value = "data/Chinook.db")]
    pub db: PathBuf,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct QueryOutput {
    /// Syntactically valid SQL query.
    query: String,
}

impl Sql {
    pub async fn run(self, session: &Session) -> Result<()> {
        if !self.db.exists() {
            bail!("database {} not found", self.db.display());
        }
        let db = Database::open(&self.db)
            .with_context(|| format!("failed to open {}", self.db.display()))?;
        let provider = session.provider()?;
        let general = session.general_at(0.0);

        println!("question: {}", self.question);
        println!("\n====\n");

        let table_info = db.table_info()?;
        let top_k = TOP_K.to_string();
        let prompt = ChatPrompt::from_messages(&[
            (Role::System, QUERY_PROMPT),
            (Role::User, "Question: {input}"),
        ])?;
        let messages = prompt.format(&[
            ("dialect", db.dialect()),
            ("top_k", top_k.as_str()),
            ("table_info", table_info.as_str()),
            ("input", self.question.as_str()),
        ])?;
        let output: QueryOutput =
            runtime::extract(&provider, general.clone(), "query_output", &messages).await?;
        println!("query: {}", output.query);
        println!("\n====\n");

        let result = db.run(&output.query);
        println!("result: {result}");
        println!("\n====\n");

        let answer = format!(
            "Given the following user question, corresponding SQL query, and SQL result, \
             answer the user question in one sentence.\n\n\
             Question: {}\nSQL Query: {}\nSQL Result: {result}\n",
            self.question, output.query
        );
        let response = provider
            .send(&Request::from(general), &[Message::user(answer)])
            .await?;
        println!("answer: {}", response.content().cloned().unwrap_or_default());
        println!("\n====\n");
        Ok(())
    }
}
