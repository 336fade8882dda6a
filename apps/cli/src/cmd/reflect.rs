//! A reflection agent with configurable personality levels.

use crate::session::Session;
use agent::Agent;
use anyhow::Result;
use clap::Args;
use llm::Message;
use tools::{
    Blend, reflection,
    search::{TAVILY, register_tavily},
};

const PROMPT: &str = include_str!("../../prompts/reflection.md");

/// Reflect on a thought.
#[derive(Args, Debug)]
pub struct Reflect {
    /// The thought or idea to explore.
    pub prompt: String,

    /// Thread id.
    #[arg(long, default_value = "reflection")]
    pub thread: String,

    #[arg(long, default_value_t = 0.8)]
    pub joy: f64,
    #[arg(long, default_value_t = 0.1)]
    pub sadness: f64,
    #[arg(long, default_value_t = 0.05)]
    pub anger: f64,
    #[arg(long, default_value_t = 0.02)]
    pub fear: f64,
    #[arg(long, default_value_t = 0.03)]
    pub disgust: f64,
}

impl Reflect {
    pub fn blend(&self) -> Blend {
        Blend([self.joy, self.sadness, self.anger, self.fear, self.disgust])
    }

    pub async fn run(self, session: &Session) -> Result<()> {
        let mut rt = session.runtime(session.general_at(0.7))?;
        reflection::register(&mut rt, self.blend());

        let mut agent = Agent::new("reflector")
            .system_prompt(PROMPT)
            .tool("generate_reflection");
        match session.tavily(3) {
            Ok(tavily) => {
                register_tavily(&mut rt, tavily);
                agent = agent.tool(TAVILY);
            }
            Err(e) => tracing::warn!("{e}, reflecting without web search"),
        }
        rt.add_agent(agent);

        let response = rt
            .send("reflector", Some(self.thread.as_str()), Message::user(self.prompt.as_str()))
            .await?;
        println!("{}", response.content().cloned().unwrap_or_default());
        Ok(())
    }
}
