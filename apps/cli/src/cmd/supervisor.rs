//! A supervisor delegating to math, research and review workers.

use crate::session::Session;
use agent::Agent;
use anyhow::Result;
use clap::Args;
use llm::Message;
use runtime::build_team;
use tools::{math, search::{TAVILY, register_tavily}};

const SUPERVISOR: &str = "You are a team supervisor managing a research expert, a math expert and a review expert. \
For current events, use research_agent. \
For reviewing the research, use review_agent. \
For math problems, use math_agent.";

/// Ask the supervised team a question.
#[derive(Args, Debug)]
pub struct Supervisor {
    /// The question.
    #[arg(default_value = "what's the combined headcount of the FAANG companies in 2024??")]
    pub question: String,
}

impl Supervisor {
    pub async fn run(self, session: &Session) -> Result<()> {
        let mut rt = session.runtime(session.general())?;
        math::register(&mut rt);
        register_tavily(&mut rt, session.tavily(5)?);

        let workers = vec![
            Agent::new("math_agent")
                .description("A math expert that adds and multiplies numbers.")
                .system_prompt("You are a math expert. Always use one tool at a time.")
                .tools(["add", "multiply"]),
            Agent::new("research_agent")
                .description("A researcher with web search, for current events.")
                .system_prompt(
                    "You are a world class researcher with access to web search. Do not do any math.",
                )
                .tool(TAVILY),
            Agent::new("review_agent")
                .description("A reviewer that critiques research.")
                .system_prompt(
                    "You are a world class research reviewer. Do not do any math or research. \
                     You should provide the best review for the content.",
                ),
        ];
        let leader = build_team(
            Agent::new("supervisor").system_prompt(SUPERVISOR),
            workers,
            &mut rt,
        );
        rt.add_agent(leader);

        let response = rt
            .send("supervisor", None, Message::user(self.question))
            .await?;
        println!("{}", response.content().cloned().unwrap_or_default());
        Ok(())
    }
}
