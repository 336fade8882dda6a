//! Conversation checkpoints keyed by thread id.

use compact_str::CompactString;
use llm::Message;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The checkpointed state of one conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// Message history, without system prompts.
    pub messages: Vec<Message>,
    /// The agent currently in control, for swarms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<CompactString>,
}

impl Thread {
    /// Generate a fresh thread id.
    pub fn new_id() -> CompactString {
        ulid::Ulid::new().to_string().into()
    }
}

/// Storage for conversation threads
pub trait Checkpointer: Send + Sync {
    /// Load the latest state of a thread
    fn load(&self, thread: &str) -> Option<Thread>;

    /// Replace the state of a thread
    fn save(&self, thread: &str, state: Thread);
}

/// In-memory checkpointer, lost when the process exits
#[derive(Default)]
pub struct MemorySaver {
    threads: Mutex<BTreeMap<CompactString, Thread>>,
}

impl MemorySaver {
    /// Create an empty saver
    pub fn new() -> Self {
        Self::default()
    }
}

impl Checkpointer for MemorySaver {
    fn load(&self, thread: &str) -> Option<Thread> {
        self.threads.lock().get(thread).cloned()
    }

    fn save(&self, thread: &str, state: Thread) {
        tracing::trace!(
            "checkpoint {thread}: {} messages, active {:?}",
            state.messages.len(),
            state.active
        );
        self.threads.lock().insert(thread.into(), state);
    }
}
