//! Scripted LLM provider for tests.
//!
//! Replays queued responses in order and records every request it
//! receives, so callers can assert on prompts, tools and tool choices.

use crate::{General, LLM, Message, Response, StreamChunk, ToolCall};
use anyhow::{Result, anyhow};
use futures_core::Stream;
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

/// A recorded request
#[derive(Debug, Clone)]
pub struct Request {
    pub config: General,
    pub messages: Vec<Message>,
}

/// A provider that answers from a queue of canned responses.
///
/// Clones share the same queue and request log.
#[derive(Clone, Default)]
pub struct Scripted {
    replies: Arc<Mutex<VecDeque<Response>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Scripted {
    /// Create a provider with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text reply
    pub fn reply(self, content: impl Into<String>) -> Self {
        self.push(Message::assistant(content))
    }

    /// Queue a reply that calls a single tool
    pub fn call(self, name: &str, arguments: impl Into<String>) -> Self {
        let id = format!("call_{}", self.requests.lock().len() + self.replies.lock().len());
        self.push(Message::assistant("").with_tool_calls(&[ToolCall::function(
            id, name, arguments,
        )]))
    }

    /// Queue an arbitrary assistant message
    pub fn push(self, message: Message) -> Self {
        self.respond(Response::from_message(&message))
    }

    /// Queue a raw response, e.g. one with an unusual finish reason
    pub fn respond(self, response: Response) -> Self {
        self.replies.lock().push_back(response);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Number of replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }

    fn next(&self, config: General, messages: &[Message]) -> Result<Response> {
        self.requests.lock().push(Request {
            config,
            messages: messages.to_vec(),
        });
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted provider has no replies left"))
    }
}

impl LLM for Scripted {
    type ChatConfig = General;

    async fn send(&self, config: &General, messages: &[Message]) -> Result<Response> {
        self.next(config.clone(), messages)
    }

    fn stream(
        &self,
        config: General,
        messages: &[Message],
        _usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let next = self.next(config, messages);
        async_stream::try_stream! {
            let response = next?;
            yield StreamChunk::from(response);
        }
    }
}
