//! Token research swarm: a supervisor, a market researcher and a social
//! analyst. The final answer is written as a markdown report.

use crate::session::Session;
use agent::{Agent, Thread};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use llm::Message;
use runtime::Swarm;
use tools::{
    Report, onchain,
    search::{TAVILY, register_tavily},
};

const TOKEN: &str = "0xf1fc9580784335b2613c1392a530c1aa2a69ba3d";
const SUPERVISOR: &str = include_str!("../../prompts/research_supervisor.md");
const MARKET: &str = include_str!("../../prompts/market_researcher.md");
const SOCIAL: &str = include_str!("../../prompts/social_analyst.md");

/// Research a token and save a report.
#[derive(Args, Debug)]
pub struct Research {
    /// Token contract address.
    #[arg(default_value = TOKEN)]
    pub token: String,
}

impl Research {
    pub async fn run(self, session: &Session) -> Result<()> {
        let mut rt = session.runtime(session.general_at(0.2))?;
        register_tavily(&mut rt, session.tavily(5)?);

        let mut social = Agent::new("social_analyst").system_prompt(SOCIAL);
        if let Some(farcaster) = session.farcaster() {
            onchain::register_search(&mut rt, farcaster);
            social = social.tool("farcaster_search");
        }

        let agents = vec![
            Agent::new("supervisor").system_prompt(SUPERVISOR),
            Agent::new("market_researcher")
                .system_prompt(MARKET)
                .tool(TAVILY),
            social,
        ];
        let swarm = Swarm::new(&mut rt, agents, "supervisor")?;
        swarm.handoff(
            &mut rt,
            "supervisor",
            "market_researcher",
            "Transfer to the market research agent that can analyze token fundamentals and market data.",
        )?;
        swarm.handoff(
            &mut rt,
            "supervisor",
            "social_analyst",
            "Transfer to the social analyst agent that can analyze Farcaster activity and sentiment.",
        )?;
        for worker in ["market_researcher", "social_analyst"] {
            swarm.handoff(
                &mut rt,
                worker,
                "supervisor",
                "Transfer back to the supervisor to compile the final report.",
            )?;
        }

        let thread = Thread::new_id();
        let reply = swarm
            .send(&rt, Some(thread.as_str()), Message::user(self.token.as_str()))
            .await?;
        let response = reply.response.content().cloned().unwrap_or_default();

        let path = Report::new("Swarm Agent Research Report")
            .subject(self.token.as_str())
            .section("", response.as_str())
            .write(session.reports_dir(), "swarm_report", &Local::now())?;
        println!("Swarm report saved to: {}", path.display());
        println!("Swarm response => {response}");
        Ok(())
    }
}
