//! Swarms: agents that hand a conversation to each other.
//!
//! A handoff is a tool named `transfer_to_<agent>`. When the active agent
//! calls one, control moves to the target, which continues over the same
//! history with its own prompt and tools. The active agent is saved with
//! the thread, so the next message goes to whoever spoke last.

use crate::Runtime;
use agent::Agent;
use anyhow::{Result, anyhow, bail};
use compact_str::{CompactString, format_compact};
use llm::{LLM, Message, Response, Tool};

/// Upper bound on handoffs per message.
const MAX_HANDOFFS: usize = 8;

/// The handoff tool for `agent`.
pub fn handoff_tool(agent: &str, description: impl Into<String>) -> Tool {
    Tool::bare(format_compact!("transfer_to_{agent}"), description)
}

/// A swarm's reply to one message
pub struct Reply {
    /// The final model response.
    pub response: Response,
    /// The agent that produced it.
    pub agent: CompactString,
}

/// A group of agents sharing threads
pub struct Swarm {
    agents: Vec<CompactString>,
    default: CompactString,
}

impl Swarm {
    /// Register the agents on the runtime; `default` answers threads that
    /// have no active agent yet.
    pub fn new<P: LLM>(
        runtime: &mut Runtime<P>,
        agents: Vec<Agent>,
        default: &str,
    ) -> Result<Self> {
        let names: Vec<CompactString> = agents.iter().map(|a| a.name.clone()).collect();
        if !names.iter().any(|n| n == default) {
            bail!("default agent '{default}' is not part of the swarm");
        }
        for agent in agents {
            runtime.add_agent(agent);
        }
        Ok(Self {
            agents: names,
            default: default.into(),
        })
    }

    /// Give `from` a tool that hands the conversation to `to`.
    pub fn handoff<P: LLM>(
        &self,
        runtime: &mut Runtime<P>,
        from: &str,
        to: &str,
        description: impl Into<String>,
    ) -> Result<()> {
        if !self.contains(to) {
            bail!("handoff target '{to}' is not part of the swarm");
        }
        let tool = handoff_tool(to, description);
        let name = tool.name.clone();
        runtime.register_handoff(tool, to.into());

        let mut agent = runtime
            .agent(from)
            .filter(|_| self.contains(from))
            .cloned()
            .ok_or_else(|| anyhow!("agent '{from}' is not part of the swarm"))?;
        if !agent.tools.contains(&name) {
            agent.tools.push(name);
        }
        runtime.add_agent(agent);
        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.agents.iter().any(|a| a == name)
    }

    /// The agent that will answer the next message on `thread`.
    pub fn active<P: LLM>(&self, runtime: &Runtime<P>, thread: Option<&str>) -> CompactString {
        runtime
            .thread(thread)
            .active
            .filter(|name| self.contains(name))
            .unwrap_or_else(|| self.default.clone())
    }

    /// Send a message to the thread's active agent, following handoffs.
    pub async fn send<P: LLM>(
        &self,
        runtime: &Runtime<P>,
        thread: Option<&str>,
        message: Message,
    ) -> Result<Reply> {
        let mut state = runtime.thread(thread);
        let mut active = self.active(runtime, thread);
        state.messages.push(message);

        for _ in 0..MAX_HANDOFFS {
            let agent = runtime
                .agent(&active)
                .ok_or_else(|| anyhow!("agent '{active}' not registered"))?;
            let outcome = runtime.run(agent, &mut state.messages, true).await?;
            match outcome.handoff {
                Some(target) => {
                    tracing::debug!("handoff {active} -> {target}");
                    active = target;
                }
                None => {
                    state.active = Some(active.clone());
                    runtime.save(thread, state);
                    return Ok(Reply {
                        response: outcome.response,
                        agent: active,
                    });
                }
            }
        }

        bail!("max handoffs reached");
    }
}
