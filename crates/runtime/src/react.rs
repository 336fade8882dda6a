//! The reason/act loop shared by agents, team workers and swarms.

use crate::{MAX_TOOL_CALLS, Toolbox};
use anyhow::{Result, bail};
use compact_str::CompactString;
use llm::{Config, LLM, Message, Response, Role, ToolChoice};
use std::collections::BTreeMap;

/// How a loop run ended.
pub(crate) struct Outcome {
    /// The last model response.
    pub response: Response,
    /// The agent a handoff tool transferred control to, if any.
    pub handoff: Option<CompactString>,
}

/// The parts of a runtime a loop needs, borrowed.
pub(crate) struct Step<'a, P: LLM> {
    pub provider: &'a P,
    pub config: P::ChatConfig,
    pub toolbox: &'a Toolbox,
    /// Handoff tool name to target agent.
    pub handoffs: &'a BTreeMap<CompactString, CompactString>,
    pub system_prompt: &'a str,
}

/// Build the request config for a set of tools.
pub(crate) fn chat_config<P: LLM>(general: llm::General, toolbox: &Toolbox) -> P::ChatConfig {
    let config = P::ChatConfig::from(general);
    if toolbox.is_empty() {
        return config;
    }
    config
        .with_tools(toolbox.tools())
        .with_tool_choice(ToolChoice::Auto)
}

/// Prepend the system prompt to the stored history.
pub(crate) fn api_messages(system_prompt: &str, history: &[Message]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    if !system_prompt.is_empty() && history.first().map(|m| m.role) != Some(Role::System) {
        messages.push(Message::system(system_prompt));
    }
    messages.extend(history.iter().cloned());
    messages
}

impl<P: LLM> Step<'_, P> {
    /// Call the model until it answers without tool calls, a handoff
    /// happens, or the round limit is hit. New messages are appended to
    /// `history`.
    pub(crate) async fn run(&self, history: &mut Vec<Message>) -> Result<Outcome> {
        for _ in 0..MAX_TOOL_CALLS {
            let messages = api_messages(self.system_prompt, history);
            tracing::debug!(
                "model round over {} messages, ~{} tokens",
                messages.len(),
                llm::estimate_tokens(&messages)
            );
            let response = self.provider.send(&self.config, &messages).await?;
            let Some(message) = response.message() else {
                return Ok(Outcome {
                    response,
                    handoff: None,
                });
            };

            if message.tool_calls.is_empty() {
                history.push(message);
                return Ok(Outcome {
                    response,
                    handoff: None,
                });
            }

            let calls = message.tool_calls.clone();
            history.push(message);

            let mut handoff = None;
            for call in &calls {
                let name = call.function.name.as_str();
                // only handoff tools the agent was given count
                let target = self.handoffs.get(name).filter(|_| self.toolbox.contains(name));
                match target {
                    Some(target) => {
                        history.push(Message::tool(
                            format!("Successfully transferred to {target}"),
                            call.id.clone(),
                        ));
                        handoff.get_or_insert_with(|| target.clone());
                    }
                    None => history.push(self.toolbox.call(call).await),
                }
            }

            if handoff.is_some() {
                return Ok(Outcome { response, handoff });
            }
        }

        bail!("max tool calls reached");
    }
}
