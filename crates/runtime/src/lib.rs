//! Scout runtime: the top-level orchestrator.
//!
//! The [`Runtime`] holds the LLM provider, agent configurations, tool
//! handlers and an optional checkpointer for conversation threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent::{Agent, MemorySaver};
//! use llm::{General, Message};
//! use runtime::Runtime;
//!
//! let provider = openai::OpenAI::api(llm::Client::new(), &key)?;
//! let mut runtime = Runtime::new(General::new("gpt-4o-mini"), provider)
//!     .with_checkpointer(MemorySaver::new());
//! runtime.add_agent(Agent::new("assistant").system_prompt("You are helpful."));
//! let response = runtime.send("assistant", Some("1"), Message::user("hello")).await?;
//! ```

pub use structured::extract;
pub use swarm::{Swarm, handoff_tool};
pub use team::{build_team, extract_input, worker_tool};
pub use toolbox::{Handler, Toolbox, handler};

use agent::{Agent, Checkpointer, Thread};
use anyhow::{Result, anyhow};
use compact_str::CompactString;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{FinishReason, General, LLM, Message, Response, Role, StreamChunk, Tool, ToolCall};
use react::{Step, api_messages, chat_config};
use std::{collections::BTreeMap, future::Future, sync::Arc, time::Duration};

mod react;
pub mod structured;
pub mod swarm;
pub mod team;
mod toolbox;

/// Upper bound on model rounds per invocation.
pub const MAX_TOOL_CALLS: usize = 16;

/// A deadline passed before the agent finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(pub Duration);

impl std::fmt::Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timed out after {}ms", self.0.as_millis())
    }
}

impl std::error::Error for Elapsed {}

/// The scout runtime.
pub struct Runtime<P: LLM> {
    provider: P,
    config: General,
    tools: Toolbox,
    handoffs: BTreeMap<CompactString, CompactString>,
    agents: BTreeMap<CompactString, Agent>,
    checkpointer: Option<Arc<dyn Checkpointer>>,
}

impl<P: LLM> Runtime<P> {
    /// Create a new runtime with the given config and provider.
    pub fn new(config: General, provider: P) -> Self {
        Self {
            provider,
            config,
            tools: Toolbox::default(),
            handoffs: BTreeMap::new(),
            agents: BTreeMap::new(),
            checkpointer: None,
        }
    }

    /// Persist threads with the given checkpointer.
    pub fn with_checkpointer(mut self, checkpointer: impl Checkpointer + 'static) -> Self {
        self.checkpointer = Some(Arc::new(checkpointer));
        self
    }

    /// The default chat config.
    pub fn config(&self) -> &General {
        &self.config
    }

    /// The LLM provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Register an agent.
    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.insert(agent.name.clone(), agent);
    }

    /// Get a registered agent by name.
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    /// Register a tool with its handler.
    pub fn register<F, Fut>(&mut self, tool: Tool, f: F)
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        self.tools.insert(tool, handler(f));
    }

    /// Register a tool whose call hands a swarm conversation to `target`.
    pub(crate) fn register_handoff(&mut self, tool: Tool, target: CompactString) {
        let reply = format!("Successfully transferred to {target}");
        self.handoffs.insert(tool.name.clone(), target);
        self.register(tool, move |_| {
            let reply = reply.clone();
            async move { reply }
        });
    }

    /// Resolve tool schemas for the given tool names.
    pub fn resolve(&self, names: &[CompactString]) -> Vec<Tool> {
        self.tools.subset(names).tools()
    }

    /// The registered tools for the given names, with handlers.
    pub fn toolbox(&self, names: &[CompactString]) -> Toolbox {
        self.tools.subset(names)
    }

    /// Dispatch tool calls and collect results as tool messages.
    pub async fn dispatch(&self, calls: &[ToolCall]) -> Vec<Message> {
        self.tools.dispatch(calls).await
    }

    /// The stored state of a thread, empty when unknown or unsaved.
    pub fn thread(&self, thread: Option<&str>) -> Thread {
        match (thread, &self.checkpointer) {
            (Some(id), Some(saver)) => saver.load(id).unwrap_or_default(),
            _ => Thread::default(),
        }
    }

    fn save(&self, thread: Option<&str>, state: Thread) {
        if let (Some(id), Some(saver)) = (thread, &self.checkpointer) {
            saver.save(id, state);
        }
    }

    /// The default config with the agent's overrides applied.
    pub fn general(&self, agent: &Agent) -> General {
        let mut general = self.config.clone();
        if let Some(model) = &agent.model {
            general.model = model.clone();
        }
        if let Some(temperature) = agent.temperature {
            general.temperature = Some(temperature);
        }
        general
    }

    fn require(&self, name: &str) -> Result<&Agent> {
        self.agents
            .get(name)
            .ok_or_else(|| anyhow!("agent '{name}' not registered"))
    }

    /// Run one agent over a history; swarm handoffs are honored when
    /// `handoffs` is set.
    pub(crate) async fn run(
        &self,
        agent: &Agent,
        history: &mut Vec<Message>,
        handoffs: bool,
    ) -> Result<react::Outcome> {
        let toolbox = self.tools.subset(&agent.tools);
        let empty = BTreeMap::new();
        let step = Step {
            provider: &self.provider,
            config: chat_config::<P>(self.general(agent), &toolbox),
            toolbox: &toolbox,
            handoffs: if handoffs { &self.handoffs } else { &empty },
            system_prompt: &agent.system_prompt,
        };
        step.run(history).await
    }

    /// Send a message to an agent (non-streaming).
    ///
    /// With a checkpointer and a thread id, the thread's history is loaded
    /// first and saved after a successful run.
    pub async fn send(
        &self,
        agent: &str,
        thread: Option<&str>,
        message: Message,
    ) -> Result<Response> {
        let agent = self.require(agent)?;
        let mut state = self.thread(thread);
        state.messages.push(message);

        let outcome = self.run(agent, &mut state.messages, false).await?;
        self.save(thread, state);
        Ok(outcome.response)
    }

    /// Stream a message to an agent.
    ///
    /// Content chunks are yielded as they arrive. When a round ends in tool
    /// calls, a chunk carrying those calls is yielded before they are
    /// dispatched, then a separator chunk opens the next round.
    pub fn stream<'a>(
        &'a self,
        agent: &'a str,
        thread: Option<&'a str>,
        message: Message,
    ) -> impl Stream<Item = Result<StreamChunk>> + 'a {
        async_stream::try_stream! {
            let agent = self.require(agent)?;
            let toolbox = self.tools.subset(&agent.tools);
            let config = chat_config::<P>(self.general(agent), &toolbox);
            let mut state = self.thread(thread);
            state.messages.push(message);

            for round in 0..MAX_TOOL_CALLS {
                if round > 0 {
                    yield StreamChunk::separator();
                }

                let messages = api_messages(&agent.system_prompt, &state.messages);
                let mut builder = Message::builder(Role::Assistant);
                let inner = self.provider.stream(config.clone(), &messages, self.config.usage);
                futures_util::pin_mut!(inner);

                while let Some(result) = inner.next().await {
                    let chunk = match result {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            tracing::error!("error in LLM stream: {e:?}");
                            Err(e)?
                        }
                    };

                    let reason = chunk.reason().copied();
                    if builder.accept(&chunk) {
                        yield chunk;
                    }

                    match reason {
                        None
                        | Some(FinishReason::Stop)
                        | Some(FinishReason::ToolCalls)
                        | Some(FinishReason::Length) => {}
                        Some(reason) => {
                            Err::<(), _>(anyhow!("unexpected finish reason: {reason:?}"))?
                        }
                    }
                }

                let message = builder.build();
                if message.tool_calls.is_empty() {
                    state.messages.push(message);
                    self.save(thread, state);
                    return;
                }

                yield StreamChunk::tool(&message.tool_calls);
                let results = toolbox.dispatch(&message.tool_calls).await;
                state.messages.push(message);
                state.messages.extend(results);
            }

            Err::<(), _>(anyhow!("max tool calls reached"))?;
        }
    }

    /// [`Runtime::stream`] bounded by a deadline.
    ///
    /// Every chunk is handed to `on_chunk` as it arrives; the concatenated
    /// content is returned. Running out of time fails with [`Elapsed`].
    pub async fn stream_timeout<F>(
        &self,
        agent: &str,
        thread: Option<&str>,
        message: Message,
        timeout: Duration,
        mut on_chunk: F,
    ) -> Result<String>
    where
        F: FnMut(&StreamChunk),
    {
        let run = async {
            let stream = self.stream(agent, thread, message);
            futures_util::pin_mut!(stream);
            let mut text = String::new();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                on_chunk(&chunk);
                text.push_str(chunk.content().unwrap_or_default());
            }
            Ok::<_, anyhow::Error>(text)
        };
        match tokio::time::timeout(timeout, run).await {
            Ok(result) => result,
            Err(_) => Err(Elapsed(timeout).into()),
        }
    }

    /// Decode a `T` from the model, see [`structured::extract`].
    pub async fn extract<T>(&self, name: &str, messages: &[Message]) -> Result<T>
    where
        T: schemars::JsonSchema + serde::de::DeserializeOwned,
    {
        structured::extract::<T, P>(&self.provider, self.config.clone(), name, messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent::MemorySaver;
    use llm::Scripted;

    fn add_tool() -> Tool {
        Tool::bare("add", "add two numbers")
    }

    fn runtime(provider: Scripted) -> Runtime<Scripted> {
        let mut rt = Runtime::new(General::new("test-model"), provider)
            .with_checkpointer(MemorySaver::new());
        rt.register(add_tool(), |_| async move { "5".to_owned() });
        rt.add_agent(
            Agent::new("assistant")
                .system_prompt("You are helpful.")
                .tool("add"),
        );
        rt
    }

    #[tokio::test]
    async fn send_dispatches_tools_then_finishes() {
        let provider = Scripted::new()
            .call("add", r#"{"a":2,"b":3}"#)
            .reply("2 + 3 = 5");
        let rt = runtime(provider.clone());

        let response = rt
            .send("assistant", None, Message::user("what's 2 + 3?"))
            .await
            .unwrap();
        assert_eq!(response.content().unwrap(), "2 + 3 = 5");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert_eq!(requests[0].config.tools.as_ref().unwrap()[0].name, "add");

        let second = &requests[1].messages;
        let tool_result = second.last().unwrap();
        assert_eq!(tool_result.role, Role::Tool);
        assert_eq!(tool_result.content, "5");
    }

    #[tokio::test]
    async fn agent_overrides_apply_to_requests() {
        let provider = Scripted::new().reply("ok");
        let mut rt = Runtime::new(General::new("default-model"), provider.clone());
        rt.add_agent(Agent::new("cold").model("other-model").temperature(0.0));

        rt.send("cold", None, Message::user("hi")).await.unwrap();
        let config = &provider.requests()[0].config;
        assert_eq!(config.model, "other-model");
        assert_eq!(config.temperature, Some(0.0));
        assert!(config.tools.is_none());
    }

    #[tokio::test]
    async fn thread_history_persists() {
        let provider = Scripted::new().reply("Hello Bob!").reply("Your name is Bob.");
        let rt = runtime(provider.clone());

        rt.send("assistant", Some("1"), Message::user("hi! I'm bob"))
            .await
            .unwrap();
        rt.send("assistant", Some("1"), Message::user("what's my name?"))
            .await
            .unwrap();

        let second = &provider.requests()[1].messages;
        assert_eq!(second.len(), 4);
        assert_eq!(second[1].content, "hi! I'm bob");
        assert_eq!(second[2].content, "Hello Bob!");
        assert_eq!(rt.thread(Some("1")).messages.len(), 4);
        assert!(rt.thread(Some("2")).messages.is_empty());
    }

    #[tokio::test]
    async fn unknown_agent_is_an_error() {
        let rt = runtime(Scripted::new());
        let err = rt
            .send("nobody", None, Message::user("hi"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not registered"));
    }

    #[tokio::test]
    async fn tool_loop_is_bounded() {
        let mut provider = Scripted::new();
        for _ in 0..MAX_TOOL_CALLS {
            provider = provider.call("add", "{}");
        }
        let rt = runtime(provider);
        let err = rt
            .send("assistant", None, Message::user("loop"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "max tool calls reached");
    }

    #[tokio::test]
    async fn stream_yields_content_and_saves_thread() {
        let provider = Scripted::new().call("add", "{}").reply("five");
        let rt = runtime(provider);

        let chunks: Vec<_> = rt
            .stream("assistant", Some("s"), Message::user("2 + 3?"))
            .collect()
            .await;
        let text: String = chunks
            .iter()
            .map(|c| c.as_ref().unwrap().content().unwrap_or_default().to_owned())
            .collect();
        assert_eq!(text, "\nfive");

        let thread = rt.thread(Some("s"));
        assert_eq!(thread.messages.len(), 4);
        assert_eq!(thread.messages[2].role, Role::Tool);
    }
}
