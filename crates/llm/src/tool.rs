//! Tool abstractions for the unified LLM Interfaces

use compact_str::CompactString;
use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};

/// A tool for the LLM
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tool {
    /// The name of the tool
    pub name: CompactString,

    /// The description of the tool
    pub description: String,

    /// The parameters of the tool
    pub parameters: Schema,

    /// Whether to strictly validate the parameters
    pub strict: bool,
}

impl Tool {
    /// Create a tool whose parameters are the JSON schema of `T`.
    pub fn new<T: JsonSchema>(
        name: impl Into<CompactString>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: schemars::schema_for!(T),
            strict: false,
        }
    }

    /// Create a tool that takes no arguments.
    pub fn bare(name: impl Into<CompactString>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: schemars::json_schema!({
                "type": "object",
                "properties": {},
            }),
            strict: false,
        }
    }
}

/// A tool call made by the model
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ToolCall {
    /// The ID of the tool call
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub id: CompactString,

    /// The index of the tool call (used in streaming)
    #[serde(default, skip_serializing)]
    pub index: u32,

    /// The type of tool (currently only "function")
    #[serde(default, rename = "type")]
    pub call_type: CompactString,

    /// The function to call
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a function call with JSON-string arguments.
    pub fn function(
        id: impl Into<CompactString>,
        name: impl Into<CompactString>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            index: 0,
            call_type: "function".into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Merge a streamed fragment into this call
    pub fn merge(&mut self, call: &Self) {
        if !call.id.is_empty() {
            self.id.clone_from(&call.id);
        }
        if !call.call_type.is_empty() {
            self.call_type.clone_from(&call.call_type);
        }
        if !call.function.name.is_empty() {
            self.function.name.clone_from(&call.function.name);
        }
        self.function.arguments.push_str(&call.function.arguments);
    }
}

/// A function call within a tool call
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FunctionCall {
    /// The name of the function to call
    #[serde(default, skip_serializing_if = "CompactString::is_empty")]
    pub name: CompactString,

    /// The arguments to pass to the function (JSON string)
    #[serde(default)]
    pub arguments: String,
}

/// Controls which tool is called by the model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Model will not call any tool
    None,

    /// Model can pick between generating a message or calling tools
    #[default]
    Auto,

    /// Model must call one or more tools
    Required,

    /// Model must call the named function
    Function(ToolChoiceFunction),
}

/// A specific function to call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolChoiceFunction {
    /// The name of the function to call
    pub name: CompactString,
}

impl From<&str> for ToolChoice {
    fn from(value: &str) -> Self {
        ToolChoice::Function(ToolChoiceFunction { name: value.into() })
    }
}

impl ToolChoice {
    /// The OpenAI wire form of this choice.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            ToolChoice::None => serde_json::json!("none"),
            ToolChoice::Auto => serde_json::json!("auto"),
            ToolChoice::Required => serde_json::json!("required"),
            ToolChoice::Function(function) => serde_json::json!({
                "type": "function",
                "function": { "name": function.name },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_choice_wire_form() {
        let choice = ToolChoice::from("extract");
        assert_eq!(
            choice.to_value(),
            serde_json::json!({"type": "function", "function": {"name": "extract"}})
        );
        assert_eq!(ToolChoice::Required.to_value(), serde_json::json!("required"));
    }

    #[test]
    fn merge_appends_argument_fragments() {
        let mut call = ToolCall::function("call_1", "add", "{\"a\":");
        let mut tail = ToolCall::default();
        tail.function.arguments = "1}".into();
        call.merge(&tail);
        assert_eq!(call.id, "call_1");
        assert_eq!(call.function.name, "add");
        assert_eq!(call.function.arguments, "{\"a\":1}");
    }

    #[test]
    fn bare_tool_has_object_schema() {
        let tool = Tool::bare("transfer_to_bob", "hand off");
        let value = serde_json::to_value(&tool.parameters).unwrap();
        assert_eq!(value["type"], "object");
    }
}
