//! CLI argument parsing and command dispatch.

use crate::{config, session::Session};
use anyhow::Result;
use clap::{Parser, Subcommand};
use compact_str::CompactString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod agent;
pub mod analyze;
pub mod chat;
pub mod classify;
pub mod config_cmd;
pub mod extract;
pub mod reflect;
pub mod research;
pub mod search;
pub mod sql;
pub mod summarize;
pub mod supervisor;
pub mod swarm;
pub mod translate;

/// LLM agent demos for on-chain token research.
#[derive(Parser, Debug)]
#[command(name = "scout", about = "LLM agent demos for on-chain token research")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Model name override.
    #[arg(long, global = true)]
    pub model: Option<CompactString>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with the model, one-shot or interactively.
    Chat(chat::Chat),
    /// Translate text with a prompt template.
    Translate(translate::Translate),
    /// Tag text with sentiment, aggressiveness and language.
    Classify(classify::Classify),
    /// Extract people from text.
    Extract(extract::Extract),
    /// Summarize the paragraphs of a web page.
    Summarize(summarize::Summarize),
    /// Multi-turn agent with Tavily search and thread memory.
    Agent(agent::AgentCmd),
    /// Agent with the OpenAI web search tool.
    Search(search::Search),
    /// Math, research and review team under a supervisor.
    Supervisor(supervisor::Supervisor),
    /// Alice and Bob swarm with handoffs.
    Swarm(swarm::SwarmCmd),
    /// Token research swarm that writes a markdown report.
    Research(research::Research),
    /// Contract analysis supervisor with a deadline.
    Analyze(analyze::Analyze),
    /// Reflect on a prompt through personality levels.
    Reflect(reflect::Reflect),
    /// Answer a question over a SQLite database.
    Sql(sql::Sql),
    /// Show the resolved configuration.
    Config(config_cmd::ConfigCmd),
}

impl Cli {
    /// Install the tracing subscriber. `RUST_LOG` wins over `-v`.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(self.verbose)));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    /// Resolve config and run the command.
    pub async fn run(self) -> Result<()> {
        if let Command::Config(cmd) = &self.command {
            return cmd.run(self.config.as_deref());
        }

        let (path, config) = config::resolve_config(self.config.as_deref())?;
        tracing::debug!("using config {}", path.display());
        let session = Session::new(config, path, self.model);

        match self.command {
            Command::Chat(cmd) => cmd.run(&session).await,
            Command::Translate(cmd) => cmd.run(&session).await,
            Command::Classify(cmd) => cmd.run(&session).await,
            Command::Extract(cmd) => cmd.run(&session).await,
            Command::Summarize(cmd) => cmd.run(&session).await,
            Command::Agent(cmd) => cmd.run(&session).await,
            Command::Search(cmd) => cmd.run(&session).await,
            Command::Supervisor(cmd) => cmd.run(&session).await,
            Command::Swarm(cmd) => cmd.run(&session).await,
            Command::Research(cmd) => cmd.run(&session).await,
            Command::Analyze(cmd) => cmd.run(&session).await,
            Command::Reflect(cmd) => cmd.run(&session).await,
            Command::Sql(cmd) => cmd.run(&session).await,
            Command::Config(_) => Ok(()),
        }
    }
}

/// The log filter for a `-v` count.
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "scout=debug,info",
        2 => "scout=trace,info",
        3 => "debug",
        _ => "trace",
    }
}
