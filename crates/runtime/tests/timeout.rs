//! Deadline handling for streamed agent runs.

use agent::Agent;
use anyhow::Result;
use futures_core::Stream;
use llm::{General, LLM, Message, Response, Scripted, StreamChunk, Tool};
use scout_runtime::{Elapsed, Runtime};
use std::time::Duration;

/// A provider that answers after a fixed delay.
#[derive(Clone)]
struct Slow(Duration);

impl LLM for Slow {
    type ChatConfig = General;

    async fn send(&self, _config: &General, _messages: &[Message]) -> Result<Response> {
        tokio::time::sleep(self.0).await;
        Ok(Response::from_message(&Message::assistant("done")))
    }

    fn stream(
        &self,
        _config: General,
        _messages: &[Message],
        _usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let delay = self.0;
        futures_util::stream::once(async move {
            tokio::time::sleep(delay).await;
            Ok(StreamChunk::from(Response::from_message(&Message::assistant("done"))))
        })
    }
}

fn runtime(delay: Duration) -> Runtime<Slow> {
    let mut rt = Runtime::new(General::default(), Slow(delay));
    rt.add_agent(Agent::new("God").system_prompt("You coordinate the analysis."));
    rt
}

#[tokio::test(start_paused = true)]
async fn elapsed_deadline_is_an_error() {
    let rt = runtime(Duration::from_secs(600));
    let mut seen = 0;
    let err = rt
        .stream_timeout(
            "God",
            None,
            Message::user("analyze"),
            Duration::from_secs(300),
            |_| seen += 1,
        )
        .await
        .unwrap_err();
    assert_eq!(err.downcast_ref::<Elapsed>(), Some(&Elapsed(Duration::from_secs(300))));
    assert_eq!(err.to_string(), "timed out after 300000ms");
    assert_eq!(seen, 0);
}

#[tokio::test(start_paused = true)]
async fn fast_answers_pass_through() {
    let rt = runtime(Duration::from_millis(10));
    let mut chunks = Vec::new();
    let text = rt
        .stream_timeout(
            "God",
            None,
            Message::user("analyze"),
            Duration::from_secs(300),
            |chunk| chunks.push(chunk.clone()),
        )
        .await
        .unwrap();
    assert_eq!(text, "done");
    assert_eq!(chunks.len(), 1);
}

#[tokio::test]
async fn tool_steps_are_streamed_before_the_answer() {
    let provider = Scripted::new()
        .call("coingecko_fetch", r#"{"contractAddress":"0x0"}"#)
        .reply("looks healthy");
    let mut rt = Runtime::new(General::default(), provider);
    rt.register(Tool::bare("coingecko_fetch", "market data"), |_| async move {
        "price up".to_owned()
    });
    rt.add_agent(Agent::new("God").tool("coingecko_fetch"));

    let mut steps = Vec::new();
    let text = rt
        .stream_timeout(
            "God",
            None,
            Message::user("0x0"),
            Duration::from_secs(300),
            |chunk| {
                for call in chunk.tool_calls().unwrap_or_default() {
                    steps.push(call.function.name.to_string());
                }
            },
        )
        .await
        .unwrap();
    assert_eq!(steps, vec!["coingecko_fetch"]);
    assert_eq!(text, "\nlooks healthy");
}
