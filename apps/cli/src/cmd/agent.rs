//! A ReAct agent with Tavily search and thread memory.

use crate::session::Session;
use agent::Agent;
use anyhow::Result;
use clap::Args;
use llm::Message;
use tools::search::{TAVILY, register_tavily};

const AGENT: &str = "agent";

/// Ask a search-capable agent several questions on one thread.
#[derive(Args, Debug)]
pub struct AgentCmd {
    /// Messages, sent in order on the same thread.
    #[arg(default_values = ["what is the current weather in sf", "what about ny"])]
    pub turns: Vec<String>,

    /// Thread id.
    #[arg(long, default_value = "42")]
    pub thread: String,

    /// Search results per query.
    #[arg(long, default_value_t = 3)]
    pub max_results: usize,
}

impl AgentCmd {
    pub async fn run(self, session: &Session) -> Result<()> {
        let mut rt = session.runtime(session.general_at(0.0))?;
        register_tavily(&mut rt, session.tavily(self.max_results)?);
        rt.add_agent(Agent::new(AGENT).tool(TAVILY));

        for (i, turn) in self.turns.into_iter().enumerate() {
            let response = rt
                .send(AGENT, Some(self.thread.as_str()), Message::user(turn))
                .await?;
            if i > 0 {
                println!();
            }
            println!(
                "response {} => {}",
                i + 1,
                response.content().cloned().unwrap_or_default()
            );
        }
        Ok(())
    }
}
