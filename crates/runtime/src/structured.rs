//! Schema-constrained output.
//!
//! The model is forced to call a single tool whose parameters are the JSON
//! schema of `T`; the call's arguments are decoded into `T`. Providers
//! that ignore the forced choice and answer in plain JSON are handled by
//! decoding the message content instead.

use anyhow::{Context, Result, bail};
use llm::{Config, General, LLM, Message, Tool, ToolChoice};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Ask the model for a `T`, described to it as the tool `name`.
pub async fn extract<T, P>(
    provider: &P,
    config: General,
    name: &str,
    messages: &[Message],
) -> Result<T>
where
    T: JsonSchema + DeserializeOwned,
    P: LLM,
{
    let tool = Tool::new::<T>(name, format!("Record the extracted {name}."));
    let config = P::ChatConfig::from(config)
        .with_tools(vec![tool])
        .with_tool_choice(ToolChoice::from(name));
    let response = provider.send(&config, messages).await?;

    if let Some(call) = response.tool_calls().and_then(|calls| calls.first()) {
        return serde_json::from_str(&call.function.arguments)
            .with_context(|| format!("invalid {name} arguments: {}", call.function.arguments));
    }

    match response.content() {
        Some(content) if !content.trim().is_empty() => serde_json::from_str(strip_fence(content))
            .with_context(|| format!("model did not return {name} as JSON: {content}")),
        _ => bail!("model returned neither a {name} tool call nor content"),
    }
}

/// Strip a surrounding markdown code fence, if any.
fn strip_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::Scripted;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct Classification {
        sentiment: String,
        aggressiveness: u8,
        language: String,
    }

    #[tokio::test]
    async fn decodes_forced_tool_arguments() {
        let provider = Scripted::new().call(
            "classification",
            r#"{"sentiment":"positive","aggressiveness":1,"language":"Spanish"}"#,
        );
        let out: Classification = extract(
            &provider,
            General::default(),
            "classification",
            &[Message::user("Estoy increiblemente contento de haberte conocido!")],
        )
        .await
        .unwrap();
        assert_eq!(out.language, "Spanish");
        assert_eq!(out.aggressiveness, 1);

        let config = &provider.requests()[0].config;
        assert_eq!(config.tool_choice, Some(ToolChoice::from("classification")));
        assert_eq!(config.tools.as_ref().unwrap()[0].name, "classification");
    }

    #[tokio::test]
    async fn falls_back_to_fenced_content() {
        let provider = Scripted::new().reply(
            "```json\n{\"sentiment\":\"angry\",\"aggressiveness\":8,\"language\":\"English\"}\n```",
        );
        let out: Classification = extract(&provider, General::default(), "classification", &[])
            .await
            .unwrap();
        assert_eq!(out.sentiment, "angry");
    }

    #[tokio::test]
    async fn rejects_prose() {
        let provider = Scripted::new().reply("I cannot classify this.");
        let result: Result<Classification> =
            extract(&provider, General::default(), "classification", &[]).await;
        assert!(result.is_err());
    }

    #[test]
    fn strips_fences() {
        assert_eq!(strip_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_fence(" {} "), "{}");
    }
}
