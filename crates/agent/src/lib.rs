//! Agent configuration, prompt templates and conversation checkpoints.

pub use agent::Agent;
pub use checkpoint::{Checkpointer, MemorySaver, Thread};
pub use template::{ChatPrompt, Template};

mod agent;
mod checkpoint;
mod template;
