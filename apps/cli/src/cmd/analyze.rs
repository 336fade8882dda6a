//! Contract analysis: a supervisor over six specialist workers, streamed
//! step by step under a deadline.

use crate::session::Session;
use agent::{Agent, Thread};
use anyhow::{Result, bail};
use clap::Args;
use llm::{LLM, Message, StreamChunk};
use runtime::{Elapsed, Runtime, build_team};
use std::{io::Write, time::Duration};
use tools::{is_valid_address, onchain};

const SUPERVISOR: &str = include_str!("../../prompts/contract_supervisor.md");
const DATA_FETCHER: &str = include_str!("../../prompts/data_fetcher.md");
const SOCIAL: &str = include_str!("../../prompts/social_analysis.md");

/// The supervising agent.
pub const LEADER: &str = "God";

/// Analyze an Ethereum contract.
#[derive(Args, Debug)]
pub struct Analyze {
    /// Contract address, `0x` followed by 40 hex characters.
    pub address: String,

    /// Give up after this many seconds.
    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,
}

impl Analyze {
    pub async fn run(self, session: &Session) -> Result<()> {
        if !is_valid_address(&self.address) {
            bail!(
                "invalid contract address '{}', expected 0x followed by 40 hex characters",
                self.address
            );
        }

        println!("Contract Analysis Tool");
        println!("=====================\n");

        let mut rt = session.runtime(session.general())?;
        onchain::register(&mut rt, session.farcaster());
        onchain::register_report(&mut rt, session.reports_dir().to_path_buf());

        let leader = build_team(Agent::new(LEADER).system_prompt(SUPERVISOR), workers(), &mut rt);
        rt.add_agent(leader);

        supervise(&rt, &self.address, Duration::from_secs(self.timeout_secs), print_step).await?;
        println!("\nAnalysis complete");
        Ok(())
    }
}

/// Stream the team's run over `address` under a deadline, handing every
/// step to `on_step`. Returns the leader's text.
pub async fn supervise<P, F>(
    rt: &Runtime<P>,
    address: &str,
    timeout: Duration,
    on_step: F,
) -> Result<String>
where
    P: LLM,
    F: FnMut(&StreamChunk),
{
    let thread = Thread::new_id();
    let message = Message::user(address);
    match rt.stream_timeout(LEADER, Some(thread.as_str()), message, timeout, on_step).await {
        Err(e) if e.is::<Elapsed>() => {
            bail!("Analysis timed out after {}ms", timeout.as_millis())
        }
        result => result,
    }
}

fn print_step(chunk: &StreamChunk) {
    for call in chunk.tool_calls().unwrap_or_default() {
        let step = serde_json::json!({
            "tool": call.function.name,
            "arguments": call.function.arguments,
        });
        println!("\n{step:#}");
    }
    if let Some(text) = chunk.content() {
        print!("{text}");
        std::io::stdout().flush().ok();
    }
}

/// The specialist agents of the analysis team.
pub fn workers() -> Vec<Agent> {
    vec![
        Agent::new("data_fetcher_agent")
            .description("Collects social, market and on-chain data about a contract.")
            .system_prompt(DATA_FETCHER)
            .tools(onchain::FETCH_TOOLS)
            .tool("update_progress"),
        Agent::new("social_analysis_agent")
            .description("Analyzes social data for sentiment and community interest.")
            .system_prompt(SOCIAL)
            .tools([
                "analyze_social_sentiment",
                "request_additional_data",
                "update_progress",
            ]),
        Agent::new("market_analysis_agent")
            .description("Evaluates market data and price performance.")
            .system_prompt(
                "You are an expert in crypto market analysis. Given market data about a token, \
                 evaluate its performance metrics and provide insights about its market health.",
            )
            .tool("analyze_market_data"),
        Agent::new("on_chain_analysis_agent")
            .description("Evaluates on-chain data and contract health.")
            .system_prompt(
                "You are an expert in blockchain data analysis. Given on-chain data about a \
                 contract, evaluate its transparency, holder distribution, and transaction patterns.",
            )
            .tool("analyze_on_chain_data"),
        Agent::new("opportunity_evaluation_agent")
            .description("Decides whether the contract is a good opportunity.")
            .system_prompt(
                "You are a crypto investment analyst. Given social, market, and on-chain analysis, \
                 determine if a contract represents a good investment opportunity, providing clear reasoning.",
            )
            .tool("evaluate_opportunity"),
        Agent::new("report_generation_agent")
            .description("Writes the final markdown report.")
            .system_prompt(
                "You are responsible for creating comprehensive markdown reports. Compile all \
                 analysis data into a well-structured report that clearly presents the opportunity assessment.",
            )
            .tool("generate_report"),
    ]
}
