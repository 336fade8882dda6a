//! Chat completion responses

use crate::{Message, Role, tool::ToolCall};
use serde::Deserialize;

/// Metadata shared by full completions and stream chunks
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CompletionMeta {
    /// A unique identifier for the chat completion
    #[serde(default)]
    pub id: String,

    /// The object type
    #[serde(default)]
    pub object: String,

    /// Unix timestamp (in seconds) of when the response was created
    #[serde(default)]
    pub created: u64,

    /// The model used for the completion
    #[serde(default)]
    pub model: String,
}

/// Message content in a completion
///
/// Full responses carry it as `message`, stream chunks as `delta`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Delta {
    /// The role of the message author
    pub role: Option<Role>,

    /// The content of the message
    pub content: Option<String>,

    /// The reasoning content (for reasoning models)
    pub reasoning_content: Option<String>,

    /// Tool calls made by the model
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// A chat completion response from the LLM
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Response {
    /// Completion metadata
    #[serde(flatten)]
    pub meta: CompletionMeta,

    /// The list of completion choices
    pub choices: Vec<Choice>,

    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl Response {
    /// A single-choice response carrying the given message.
    pub fn from_message(message: &Message) -> Self {
        let tool_calls = (!message.tool_calls.is_empty()).then(|| message.tool_calls.to_vec());
        let finish_reason = if tool_calls.is_some() {
            FinishReason::ToolCalls
        } else {
            FinishReason::Stop
        };
        Self {
            choices: vec![Choice {
                index: 0,
                message: Delta {
                    role: Some(message.role),
                    content: Some(message.content.clone()),
                    reasoning_content: (!message.reasoning_content.is_empty())
                        .then(|| message.reasoning_content.clone()),
                    tool_calls,
                },
                finish_reason: Some(finish_reason),
            }],
            ..Default::default()
        }
    }

    /// The first choice as an assistant message
    pub fn message(&self) -> Option<Message> {
        let choice = self.choices.first()?;
        let mut message = Message::assistant(choice.message.content.clone().unwrap_or_default());
        if let Some(reasoning) = &choice.message.reasoning_content {
            message = message.with_reasoning(reasoning.as_str());
        }
        if let Some(calls) = &choice.message.tool_calls {
            message = message.with_tool_calls(calls);
        }
        Some(message)
    }

    /// The content of the first choice
    pub fn content(&self) -> Option<&String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
    }

    /// The tool calls of the first choice
    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        self.choices
            .first()
            .and_then(|choice| choice.message.tool_calls.as_deref())
            .filter(|calls| !calls.is_empty())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<&FinishReason> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_ref())
    }
}

/// A completion choice
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Choice {
    /// The index of this choice in the list
    #[serde(default)]
    pub index: u32,

    /// The generated message
    #[serde(alias = "delta", default)]
    pub message: Delta,

    /// The reason the model stopped generating
    pub finish_reason: Option<FinishReason>,
}

/// The reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished naturally
    Stop,

    /// The model hit the max token limit
    Length,

    /// Content was filtered
    ContentFilter,

    /// The model is making tool calls
    ToolCalls,

    /// Insufficient system resources
    InsufficientSystemResource,
}

/// Token usage statistics
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Usage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,

    /// Number of tokens in the completion
    pub completion_tokens: u32,

    /// Total number of tokens used
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_openai_completion() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "add", "arguments": "{\"a\":2,\"b\":3}"}
                    }]
                },
                "logprobs": null,
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let response: Response = serde_json::from_str(body).unwrap();
        assert_eq!(response.reason(), Some(&FinishReason::ToolCalls));
        assert_eq!(response.tool_calls().unwrap()[0].function.name, "add");

        let message = response.message().unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert!(message.content.is_empty());
        assert_eq!(message.tool_calls.len(), 1);
    }

    #[test]
    fn from_message_round_trips_content() {
        let response = Response::from_message(&Message::assistant("hello"));
        assert_eq!(response.content().map(String::as_str), Some("hello"));
        assert_eq!(response.reason(), Some(&FinishReason::Stop));
        assert!(response.tool_calls().is_none());
    }
}
