//! Supervisor teams: register workers as tools on a leader.
//!
//! Each worker agent is exposed as a tool. When the leader calls it, the
//! handler runs a self-contained loop with captured state (provider,
//! config, worker agent, its tools) and returns the worker's final text.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent::Agent;
//! use runtime::build_team;
//!
//! let leader = Agent::new("supervisor").system_prompt("You coordinate.");
//! let math = Agent::new("math_expert").description("Solves arithmetic").tool("add");
//!
//! let leader = build_team(leader, vec![math], &mut runtime);
//! runtime.add_agent(leader);
//! ```

use crate::{Runtime, Toolbox, react::Step, react::chat_config};
use agent::Agent;
use compact_str::CompactString;
use llm::{General, LLM, Message, Tool};
use std::{collections::BTreeMap, sync::Arc};

/// Register each worker as a tool and add it to the leader.
pub fn build_team<P: LLM>(
    mut leader: Agent,
    workers: Vec<Agent>,
    runtime: &mut Runtime<P>,
) -> Agent {
    for worker in workers {
        let ctx = Arc::new(WorkerCtx {
            provider: runtime.provider().clone(),
            config: runtime.general(&worker),
            toolbox: runtime.toolbox(&worker.tools),
            agent: worker.clone(),
        });

        let tool = worker_tool(worker.name.clone(), worker.description.clone());
        runtime.register(tool, move |args| {
            let ctx = Arc::clone(&ctx);
            async move {
                match extract_input(&args) {
                    Ok(input) => worker_send(&ctx, input).await,
                    Err(e) => format!("invalid arguments: {e}"),
                }
            }
        });

        if !leader.tools.contains(&worker.name) {
            leader.tools.push(worker.name.clone());
        }
        runtime.add_agent(worker);
    }
    leader
}

/// Immutable state for one worker handler.
struct WorkerCtx<P: LLM> {
    provider: P,
    config: General,
    toolbox: Toolbox,
    agent: Agent,
}

/// Run the worker on a single input, returning its final answer.
///
/// Errors are reported as text so the leader can react to them.
async fn worker_send<P: LLM>(ctx: &WorkerCtx<P>, input: String) -> String {
    tracing::debug!("delegating to {}: {input}", ctx.agent.name);
    let handoffs = BTreeMap::new();
    let step = Step {
        provider: &ctx.provider,
        config: chat_config::<P>(ctx.config.clone(), &ctx.toolbox),
        toolbox: &ctx.toolbox,
        handoffs: &handoffs,
        system_prompt: &ctx.agent.system_prompt,
    };

    let mut history = vec![Message::user(input)];
    match step.run(&mut history).await {
        Ok(outcome) => outcome.response.content().cloned().unwrap_or_default(),
        Err(e) => format!("worker error: {e}"),
    }
}

/// Build a tool definition for a worker agent.
///
/// Uses a standard `{ input: string }` schema so the leader can delegate
/// tasks with a single text field.
pub fn worker_tool(name: impl Into<CompactString>, description: impl Into<String>) -> Tool {
    Tool {
        strict: true,
        ..Tool::new::<WorkerInput>(name, description)
    }
}

/// Extract the `input` field from tool call arguments JSON.
pub fn extract_input(arguments: &str) -> anyhow::Result<String> {
    let parsed: WorkerInput = serde_json::from_str(arguments)?;
    Ok(parsed.input)
}

/// Arguments of a worker tool call.
#[derive(schemars::JsonSchema, serde::Deserialize)]
#[schemars(deny_unknown_fields)]
struct WorkerInput {
    /// The task or question to delegate to this agent.
    input: String,
}
