//! Unified LLM interface types and traits.
//!
//! Shared by every provider and by the runtime: `Message`, `Response`,
//! `StreamChunk`, `Tool`, `Config`, and the `LLM` trait.

pub use config::{Config, General};
pub use message::{Message, MessageBuilder, Role, estimate_tokens};
pub use provider::LLM;
pub use reqwest::{self, Client};
pub use response::{Choice, CompletionMeta, Delta, FinishReason, Response, Usage};
#[cfg(feature = "testing")]
pub use scripted::Scripted;
pub use stream::StreamChunk;
pub use tool::{FunctionCall, Tool, ToolCall, ToolChoice, ToolChoiceFunction};

mod config;
mod message;
mod provider;
mod response;
#[cfg(feature = "testing")]
mod scripted;
mod stream;
mod tool;
