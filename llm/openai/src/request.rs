//! Request body for OpenAI-compatible chat completions.

use llm::{Config, General, Message, Tool, ToolChoice};
use serde::Serialize;
use serde_json::{Value, json};

/// The request body for the chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The messages to send.
    pub messages: Vec<Message>,
    /// The model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    /// Response format, e.g. JSON mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Stream options (e.g. include_usage).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<Value>,
    /// Temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Tool choice control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    /// Tools the model may call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    /// Web search options for search-preview models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_options: Option<Value>,
}

impl Request {
    /// Clone the request with the given messages.
    pub fn messages(&self, messages: &[Message]) -> Self {
        Self {
            messages: messages.to_vec(),
            ..self.clone()
        }
    }

    /// Enable streaming for the request.
    pub fn stream(mut self, usage: bool) -> Self {
        self.stream = Some(true);
        self.stream_options = usage.then(|| json!({ "include_usage": true }));
        self
    }

    /// Enable built-in web search with the given context size
    /// (`low`, `medium` or `high`).
    pub fn web_search(mut self, context_size: &str) -> Self {
        self.web_search_options = Some(json!({ "search_context_size": context_size }));
        self
    }
}

impl From<General> for Request {
    fn from(config: General) -> Self {
        let mut req = Self {
            messages: Vec::new(),
            model: config.model.to_string(),
            max_tokens: config.max_tokens,
            response_format: config.json.then(|| json!({ "type": "json_object" })),
            stream: None,
            stream_options: None,
            temperature: config.temperature,
            tool_choice: None,
            tools: None,
            web_search_options: None,
        };

        if let Some(tools) = config.tools {
            req = req.with_tools(tools);
        }
        if let Some(tool_choice) = config.tool_choice {
            req = req.with_tool_choice(tool_choice);
        }

        req
    }
}

impl Config for Request {
    /// An empty tool list clears both tools and tool choice; the API
    /// rejects a tool choice without tools.
    fn with_tools(self, tools: Vec<Tool>) -> Self {
        if tools.is_empty() {
            return Self {
                tools: None,
                tool_choice: None,
                ..self
            };
        }

        let tools = tools
            .into_iter()
            .map(|tool| json!({ "type": "function", "function": tool }))
            .collect::<Vec<_>>();
        Self {
            tools: Some(json!(tools)),
            ..self
        }
    }

    fn with_tool_choice(self, tool_choice: ToolChoice) -> Self {
        Self {
            tool_choice: Some(tool_choice.to_value()),
            ..self
        }
    }
}
