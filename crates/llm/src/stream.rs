//! Streaming chat completion chunks

use crate::{
    FinishReason, Response,
    response::{Choice, CompletionMeta, Delta},
    tool::ToolCall,
};
use serde::Deserialize;

/// A streaming chat completion chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChunk {
    /// Completion metadata
    #[serde(flatten)]
    pub meta: CompletionMeta,

    /// The list of completion choices (with delta content)
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage statistics (only in final chunk)
    pub usage: Option<crate::Usage>,
}

impl StreamChunk {
    /// Create a new tool chunk
    pub fn tool(calls: &[ToolCall]) -> Self {
        Self::delta(Delta {
            tool_calls: Some(calls.to_vec()),
            ..Default::default()
        })
    }

    /// Create a separator chunk (newline) emitted between tool-call rounds.
    pub fn separator() -> Self {
        Self::delta(Delta {
            content: Some("\n".into()),
            ..Default::default()
        })
    }

    fn delta(delta: Delta) -> Self {
        Self {
            choices: vec![Choice {
                message: delta,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Get the content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the reasoning content of the first choice
    pub fn reasoning_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.reasoning_content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the tool calls of the first choice
    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        self.choices
            .first()
            .and_then(|choice| choice.message.tool_calls.as_deref())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<&FinishReason> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_ref())
    }
}

impl From<Response> for StreamChunk {
    fn from(response: Response) -> Self {
        let mut choices = response.choices;
        for (index, call) in choices
            .iter_mut()
            .flat_map(|c| c.message.tool_calls.iter_mut().flatten())
            .enumerate()
        {
            call.index = index as u32;
        }
        Self {
            meta: response.meta,
            choices,
            usage: response.usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_delta_chunk() {
        let line = r#"{"id":"c","object":"chat.completion.chunk","created":1,"model":"m","choices":[{"index":0,"delta":{"content":"Hel"},"finish_reason":null}]}"#;
        let chunk: StreamChunk = serde_json::from_str(line).unwrap();
        assert_eq!(chunk.content(), Some("Hel"));
        assert!(chunk.reason().is_none());
    }
}
