//! A ReAct agent whose only tool is an OpenAI web search, and a side by
//! side run of that search against a Tavily-backed agent.

use crate::session::Session;
use agent::Agent;
use anyhow::Result;
use clap::Args;
use llm::Message;
use tools::search::{TAVILY, WEB_SEARCH, register_tavily, register_web};

const AGENT: &str = "searcher";

/// Research brief used by `--compare` when no query is given.
pub const COMPARE_PROMPT: &str = include_str!("../../prompts/compare_search.md");

/// Answer a question with the web search tool.
#[derive(Args, Debug)]
pub struct Search {
    /// The question.
    pub query: Option<String>,

    /// Thread id.
    #[arg(long, default_value = "42")]
    pub thread: String,

    /// Run the OpenAI search model and a Tavily agent on the same query.
    #[arg(long)]
    pub compare: bool,

    /// Tavily results per query, for `--compare`.
    #[arg(long, default_value_t = 3)]
    pub max_results: usize,
}

impl Search {
    /// The query to run, with the mode's default when none was given.
    pub fn query(&self) -> &str {
        match (&self.query, self.compare) {
            (Some(query), _) => query,
            (None, true) => COMPARE_PROMPT,
            (None, false) => "what's the latest news on bitcoin?",
        }
    }

    pub async fn run(self, session: &Session) -> Result<()> {
        if self.compare {
            return self.compare(session).await;
        }

        let mut rt = session.runtime(session.general_at(0.0))?;
        register_web(&mut rt, session.web_search()?);
        rt.add_agent(Agent::new(AGENT).tool(WEB_SEARCH));

        let response = rt
            .send(AGENT, Some(self.thread.as_str()), Message::user(self.query()))
            .await?;
        println!("{}", response.content().cloned().unwrap_or_default());
        Ok(())
    }

    async fn compare(&self, session: &Session) -> Result<()> {
        let query = self.query();

        println!("*** OPENAI ***");
        println!("{}", session.web_search()?.search(query).await?);

        println!("\n\n*** TAVILY ***");
        let mut rt = session.runtime(session.general_at(0.0))?;
        register_tavily(&mut rt, session.tavily(self.max_results)?);
        rt.add_agent(Agent::new(AGENT).tool(TAVILY));
        let response = rt
            .send(AGENT, Some(self.thread.as_str()), Message::user(query))
            .await?;
        println!("{}", response.content().cloned().unwrap_or_default());
        Ok(())
    }
}
