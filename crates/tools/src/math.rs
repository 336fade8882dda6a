//! Arithmetic tools.

use crate::with_args;
use llm::{LLM, Tool};
use runtime::Runtime;
use schemars::JsonSchema;
use serde::Deserialize;

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

#[derive(Deserialize, JsonSchema)]
struct Operands {
    a: f64,
    b: f64,
}

/// Register `add` and `multiply`.
pub fn register<P: LLM>(runtime: &mut Runtime<P>) {
    runtime.register(Tool::new::<Operands>("add", "Add two numbers."), |args| async move {
        with_args(&args, |o: Operands| add(o.a, o.b).to_string())
    });
    runtime.register(
        Tool::new::<Operands>("multiply", "Multiply two numbers."),
        |args| async move { with_args(&args, |o: Operands| multiply(o.a, o.b).to_string()) },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::{General, Message, ToolCall};

    #[test]
    fn arithmetic() {
        assert_eq!(add(2.0, 3.0), 5.0);
        assert_eq!(multiply(4.0, 5.0), 20.0);
        assert_eq!(add(0.5, 0.25), 0.75);
    }

    #[tokio::test]
    async fn handlers_format_numbers() {
        let mut rt = Runtime::new(General::default(), llm::Scripted::new());
        register(&mut rt);

        let results = rt
            .dispatch(&[
                ToolCall::function("1", "add", r#"{"a":2,"b":3}"#),
                ToolCall::function("2", "multiply", r#"{"a":4,"b":5}"#),
                ToolCall::function("3", "add", r#"{"a":"two"}"#),
            ])
            .await;
        let contents: Vec<&str> = results.iter().map(|m: &Message| m.content.as_str()).collect();
        assert_eq!(contents[0], "5");
        assert_eq!(contents[1], "20");
        assert!(contents[2].starts_with("invalid arguments"));
    }
}
