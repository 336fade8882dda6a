//! Agent configuration.
//!
//! An [`Agent`] is pure config: name, system prompt, and tool names.
//! Tool handlers live in the runtime.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// An agent configuration.
///
/// Agents describe *what* an agent does but not *how* tool calls are
/// dispatched; the runtime resolves tool names to handlers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agent {
    /// Agent identifier, also the tool name when used as a team worker.
    pub name: CompactString,
    /// Human-readable description, shown as the tool description in teams.
    #[serde(default)]
    pub description: String,
    /// System prompt sent before each LLM request.
    #[serde(default)]
    pub system_prompt: String,
    /// Names of tools this agent can use.
    #[serde(default)]
    pub tools: Vec<CompactString>,
    /// Model override for this agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CompactString>,
    /// Sampling temperature override for this agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Agent {
    /// Create a new agent with the given name.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Add a tool by name.
    pub fn tool(mut self, name: impl Into<CompactString>) -> Self {
        self.tools.push(name.into());
        self
    }

    /// Add several tools by name.
    pub fn tools<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.tools.extend(names.into_iter().map(Into::into));
        self
    }

    /// Use a different model than the runtime default.
    pub fn model(mut self, model: impl Into<CompactString>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
