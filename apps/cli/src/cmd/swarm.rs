//! Alice and Bob hand the conversation to each other.

use crate::session::Session;
use agent::Agent;
use anyhow::Result;
use clap::Args;
use llm::Message;
use runtime::Swarm;
use tools::math;

/// Talk to the Alice/Bob swarm on one thread.
#[derive(Args, Debug)]
pub struct SwarmCmd {
    /// Messages, sent in order on the same thread.
    #[arg(default_values = ["i'd like to speak to Bob", "what's 5 + 7?"])]
    pub turns: Vec<String>,

    /// Thread id.
    #[arg(long, default_value = "1")]
    pub thread: String,
}

impl SwarmCmd {
    pub async fn run(self, session: &Session) -> Result<()> {
        let mut rt = session.runtime(session.general())?;
        math::register(&mut rt);

        let alice = Agent::new("Alice")
            .system_prompt("You are Alice, an addition expert.")
            .tool("add");
        let bob = Agent::new("Bob").system_prompt("You are Bob, you speak like a pirate.");
        let swarm = Swarm::new(&mut rt, vec![alice, bob], "Alice")?;
        swarm.handoff(
            &mut rt,
            "Alice",
            "Bob",
            "Transfer to Bob, he can help with pirate language",
        )?;
        swarm.handoff(
            &mut rt,
            "Bob",
            "Alice",
            "Transfer to Alice, she can help with math",
        )?;

        for turn in self.turns {
            println!("user: {turn}");
            let reply = swarm
                .send(&rt, Some(self.thread.as_str()), Message::user(turn))
                .await?;
            println!(
                "{}: {}\n",
                reply.agent,
                reply.response.content().cloned().unwrap_or_default()
            );
        }
        Ok(())
    }
}
