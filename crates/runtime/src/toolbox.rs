//! Tool schemas paired with their async handlers.

use compact_str::CompactString;
use llm::{Message, Tool, ToolCall};
use std::{collections::BTreeMap, future::Future, pin::Pin, sync::Arc};

/// A type-erased async tool handler.
///
/// Handlers take the raw JSON argument string and always produce text;
/// failures are reported to the model as part of that text.
pub type Handler =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = String> + Send>> + Send + Sync>;

/// Wrap an async function as a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)))
}

/// A set of callable tools keyed by name.
#[derive(Clone, Default)]
pub struct Toolbox {
    entries: BTreeMap<CompactString, (Tool, Handler)>,
}

impl Toolbox {
    /// Insert or replace a tool.
    pub fn insert(&mut self, tool: Tool, handler: Handler) {
        self.entries.insert(tool.name.clone(), (tool, handler));
    }

    /// Whether a tool with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The tools named in `names`; unknown names are skipped.
    pub fn subset(&self, names: &[CompactString]) -> Self {
        let entries = names
            .iter()
            .filter_map(|name| {
                let entry = self.entries.get(name.as_str());
                if entry.is_none() {
                    tracing::warn!("tool {name} is not registered");
                }
                entry.map(|entry| (name.clone(), entry.clone()))
            })
            .collect();
        Self { entries }
    }

    /// Tool schemas in name order.
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.values().map(|(tool, _)| tool.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run one tool call and wrap its output as a tool message.
    pub async fn call(&self, call: &ToolCall) -> Message {
        let name = call.function.name.as_str();
        let output = match self.entries.get(name) {
            Some((_, handler)) => {
                tracing::debug!("calling tool {name} with {}", call.function.arguments);
                handler(call.function.arguments.clone()).await
            }
            None => format!("function {name} not available"),
        };
        Message::tool(output, call.id.clone())
    }

    /// Run tool calls in order, collecting their results.
    pub async fn dispatch(&self, calls: &[ToolCall]) -> Vec<Message> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.call(call).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_tool() -> Tool {
        Tool::new::<String>("echo", "Echoes the input")
    }

    #[tokio::test]
    async fn dispatch_calls_handler() {
        let mut toolbox = Toolbox::default();
        toolbox.insert(echo_tool(), handler(|args| async move { format!("got: {args}") }));

        let results = toolbox
            .dispatch(&[ToolCall::function("call_1", "echo", "hello")])
            .await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "got: hello");
        assert_eq!(results[0].tool_call_id, "call_1");
    }

    #[tokio::test]
    async fn unknown_tool_reports_unavailable() {
        let toolbox = Toolbox::default();
        let result = toolbox
            .call(&ToolCall::function("call_1", "missing", ""))
            .await;
        assert_eq!(result.content, "function missing not available");
    }

    #[test]
    fn subset_skips_unknown_names() {
        let mut toolbox = Toolbox::default();
        toolbox.insert(echo_tool(), handler(|args| async move { args }));
        let subset = toolbox.subset(&["echo".into(), "missing".into()]);
        assert!(subset.contains("echo"));
        assert_eq!(subset.tools().len(), 1);
    }
}
