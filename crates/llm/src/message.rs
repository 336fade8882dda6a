//! Chat messages and the streaming message builder

use crate::{StreamChunk, ToolCall};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A message in the chat
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Message {
    /// The role of the message
    pub role: Role,

    /// The content of the message
    #[serde(default)]
    pub content: String,

    /// The reasoning content
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reasoning_content: String,

    /// The tool call id, set on tool results
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub tool_call_id: CompactString,

    /// The tool calls, set on assistant turns
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub tool_calls: SmallVec<[ToolCall; 4]>,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new tool result message
    pub fn tool(content: impl Into<String>, call: impl Into<CompactString>) -> Self {
        Self {
            tool_call_id: call.into(),
            ..Self::new(Role::Tool, content)
        }
    }

    /// Create a message with the given role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Attach tool calls to this message
    pub fn with_tool_calls(mut self, calls: &[ToolCall]) -> Self {
        self.tool_calls = calls.iter().cloned().collect();
        self
    }

    /// Attach reasoning content to this message
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning_content = reasoning.into();
        self
    }

    /// Create a new message builder
    pub fn builder(role: Role) -> MessageBuilder {
        MessageBuilder::new(role)
    }

    /// Estimate the number of tokens in this message.
    ///
    /// Uses a simple heuristic: ~4 characters per token.
    pub fn estimate_tokens(&self) -> usize {
        let calls: usize = self
            .tool_calls
            .iter()
            .map(|tc| tc.function.name.len() + tc.function.arguments.len())
            .sum();
        let chars =
            self.content.len() + self.reasoning_content.len() + self.tool_call_id.len() + calls;
        (chars / 4).max(1)
    }
}

/// Estimate total tokens across a slice of messages.
pub fn estimate_tokens(messages: &[Message]) -> usize {
    messages.iter().map(Message::estimate_tokens).sum()
}

/// Accumulates stream chunks into a single message
pub struct MessageBuilder {
    message: Message,
    /// Tool call fragments keyed by their stream index
    calls: BTreeMap<u32, ToolCall>,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new(role: Role) -> Self {
        Self {
            message: Message::new(role, ""),
            calls: BTreeMap::new(),
        }
    }

    /// Accept a chunk from the stream, returns true if it carried content
    pub fn accept(&mut self, chunk: &StreamChunk) -> bool {
        for call in chunk.tool_calls().unwrap_or_default() {
            self.calls.entry(call.index).or_default().merge(call);
        }

        if let Some(reason) = chunk.reasoning_content() {
            self.message.reasoning_content.push_str(reason);
        }

        match chunk.content() {
            Some(content) => {
                self.message.content.push_str(content);
                true
            }
            None => false,
        }
    }

    /// Build the message
    pub fn build(mut self) -> Message {
        self.message.tool_calls = self.calls.into_values().collect();
        self.message
    }
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The user role
    #[default]
    User,
    /// The assistant role
    Assistant,
    /// The system role
    System,
    /// The tool role
    Tool,
}
