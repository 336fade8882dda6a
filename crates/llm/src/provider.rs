//! Provider abstractions for the unified LLM Interfaces

use crate::{Config, Message, Response, StreamChunk};
use anyhow::Result;
use futures_core::Stream;

/// A trait for LLM providers
///
/// Constructors stay on the concrete provider types; each backend needs
/// different arguments (endpoint, key, or none at all).
pub trait LLM: Sized + Clone + Send + Sync + 'static {
    /// The chat configuration.
    type ChatConfig: Config + Send + Sync;

    /// Send a message to the LLM
    fn send(
        &self,
        config: &Self::ChatConfig,
        messages: &[Message],
    ) -> impl Future<Output = Result<Response>> + Send;

    /// Send a message to the LLM with streaming
    fn stream(
        &self,
        config: Self::ChatConfig,
        messages: &[Message],
        usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send;
}
