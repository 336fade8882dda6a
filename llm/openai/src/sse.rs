//! Server-sent event framing for streamed completions.

use llm::StreamChunk;

/// Line buffer for `data:` events split across network reads.
#[derive(Default)]
pub(crate) struct EventBuffer {
    pending: String,
    done: bool,
}

impl EventBuffer {
    /// Feed raw bytes, returning every complete chunk decoded so far.
    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Vec<StreamChunk> {
        self.pending.push_str(&String::from_utf8_lossy(bytes));
        let mut chunks = Vec::new();
        while let Some(end) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=end).collect();
            let Some(data) = line.trim().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data == "[DONE]" {
                self.done = true;
                continue;
            }
            if data.is_empty() {
                continue;
            }
            match serde_json::from_str::<StreamChunk>(data) {
                Ok(chunk) => chunks.push(chunk),
                Err(e) => tracing::warn!("failed to parse chunk: {e}, data: {data}"),
            }
        }
        chunks
    }

    /// Whether the `[DONE]` marker has been seen.
    pub(crate) fn is_done(&self) -> bool {
        self.done
    }
}
