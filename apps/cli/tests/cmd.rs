//! Command wiring that needs no network.

use anyhow::Result;
use futures_util::Stream;
use llm::{General, LLM, Message, Response, Scripted, StreamChunk};
use runtime::Runtime;
use scout_cli::{
    cmd::{
        analyze::{Analyze, LEADER, supervise, workers},
        classify::{Classification, Language, Sentiment, StrictClassification},
    },
    config::Config,
    session::Session,
};
use std::{path::PathBuf, time::Duration};

const ADDRESS: &str = "0x1234567890123456789012345678901234567890";

/// A provider that streams its answer after a fixed delay.
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

fn analysis_team<P: LLM>(provider: P) -> Runtime<P> {
    let mut rt = Runtime::new(General::default(), provider);
    tools::onchain::register(&mut rt, None);
    let leader = runtime::build_team(agent::Agent::new(LEADER), workers(), &mut rt);
    rt.add_agent(leader);
    rt
}

#[test]
fn analysis_workers_only_use_registered_tools() {
    let mut rt = Runtime::new(General::default(), Scripted::new());
    tools::onchain::register(&mut rt, None);
    tools::onchain::register_report(&mut rt, PathBuf::from("reports"));

    let workers = workers();
    assert_eq!(workers.len(), 6);
    for worker in &workers {
        assert!(!worker.system_prompt.is_empty(), "{} has no prompt", worker.name);
        assert_eq!(
            rt.resolve(&worker.tools).len(),
            worker.tools.len(),
            "{} uses an unregistered tool",
            worker.name
        );
    }
}

#[tokio::test]
async fn analyze_rejects_bad_addresses_before_any_call() {
    let session = Session::new(Config::default(), PathBuf::from("config.toml"), None);
    let err = Analyze {
        address: "0x123".to_owned(),
        timeout_secs: 300,
    }
    .run(&session)
    .await
    .unwrap_err();
    assert!(err.to_string().contains("invalid contract address '0x123'"));
}

#[test]
fn session_model_override() {
    let session = Session::new(Config::default(), PathBuf::new(), Some("gpt-4o".into()));
    assert_eq!(session.general().model, "gpt-4o");
    assert_eq!(session.general_at(0.2).temperature, Some(0.2));

    let session = Session::new(Config::default(), PathBuf::new(), None);
    assert_eq!(session.model(), "gpt-4o-mini");
    assert!(session.farcaster().is_none());
    assert!(session.tavily(3).is_err());
}

#[tokio::test(start_paused = true)]
async fn analysis_times_out_with_its_own_message() {
    let rt = analysis_team(Slow(Duration::from_secs(600)));
    let err = supervise(&rt, ADDRESS, Duration::from_secs(300), |_| {})
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Analysis timed out after 300000ms");
}

#[tokio::test]
async fn analysis_streams_each_step() {
    let provider = Scripted::new()
        .call("data_fetcher_agent", format!(r#"{{"input":"{ADDRESS}"}}"#))
        .call("coingecko_fetch", format!(r#"{{"contractAddress":"{ADDRESS}"}}"#))
        .reply("market data collected")
        .reply("The contract looks like a good opportunity.");
    let rt = analysis_team(provider.clone());

    let mut steps = Vec::new();
    let text = supervise(&rt, ADDRESS, Duration::from_secs(300), |chunk| {
        for call in chunk.tool_calls().unwrap_or_default() {
            steps.push(call.function.name.to_string());
        }
    })
    .await
    .unwrap();
    assert_eq!(steps, ["data_fetcher_agent"]);
    assert_eq!(text, "\nThe contract looks like a good opportunity.");
    assert_eq!(provider.remaining(), 0);
}

#[test]
fn strict_classification_schema_closes_the_sets() {
    let schema = serde_json::to_value(schemars::schema_for!(StrictClassification)).unwrap();
    let aggressiveness = &schema["properties"]["aggressiveness"];
    assert_eq!(aggressiveness["minimum"], 1);
    assert_eq!(aggressiveness["maximum"], 5);

    let text = schema.to_string();
    assert!(text.contains(r#"["happy","neutral","sad"]"#));
    assert!(text.contains(r#"["spanish","english","french","german","italian","portuguese"]"#));

    let loose = serde_json::to_value(schemars::schema_for!(Classification)).unwrap();
    assert_eq!(loose["properties"]["aggressiveness"]["maximum"], 10);
    assert_eq!(loose["properties"]["sentiment"]["type"], "string");
}

#[test]
fn strict_classification_rejects_unknown_values() {
    let tags: StrictClassification =
        serde_json::from_str(r#"{"sentiment":"happy","aggressiveness":1,"language":"spanish"}"#)
            .unwrap();
    assert_eq!(tags.sentiment, Sentiment::Happy);
    assert_eq!(tags.language, Language::Spanish);

    let angry = r#"{"sentiment":"angry","aggressiveness":4,"language":"spanish"}"#;
    assert!(serde_json::from_str::<StrictClassification>(angry).is_err());
}
