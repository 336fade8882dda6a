//! Swarm handoff limits and tool scoping.

use agent::{Agent, MemorySaver};
use llm::{General, Message, Scripted};
use scout_runtime::{Runtime, Swarm};

fn swarm(provider: Scripted, agents: Vec<Agent>, default: &str) -> (Runtime<Scripted>, Swarm) {
    let mut rt = Runtime::new(General::new("gpt-4o"), provider)
        .with_checkpointer(MemorySaver::new());
    let swarm = Swarm::new(&mut rt, agents, default).unwrap();
    (rt, swarm)
}

#[tokio::test]
async fn endless_handoffs_are_cut_off() {
    let mut provider = Scripted::new();
    for round in 0..9 {
        let target = if round % 2 == 0 { "Bob" } else { "Alice" };
        provider = provider.call(&format!("transfer_to_{target}"), "{}");
    }
    let (mut rt, swarm) = swarm(
        provider.clone(),
        vec![Agent::new("Alice"), Agent::new("Bob")],
        "Alice",
    );
    swarm.handoff(&mut rt, "Alice", "Bob", "Transfer to Bob").unwrap();
    swarm.handoff(&mut rt, "Bob", "Alice", "Transfer to Alice").unwrap();

    let err = swarm
        .send(&rt, Some("1"), Message::user("ping pong"))
        .await
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "max handoffs reached");
    assert_eq!(provider.requests().len(), 8);
    assert_eq!(provider.remaining(), 1);
    // nothing is saved for a failed message
    assert!(rt.thread(Some("1")).messages.is_empty());
}

#[tokio::test]
async fn handoff_tools_are_scoped_to_their_agent() {
    let provider = Scripted::new()
        .call("transfer_to_Bob", "{}")
        .reply("Carol stays in charge");
    let (mut rt, swarm) = swarm(
        provider.clone(),
        vec![Agent::new("Alice"), Agent::new("Bob"), Agent::new("Carol")],
        "Carol",
    );
    swarm.handoff(&mut rt, "Alice", "Bob", "Transfer to Bob").unwrap();

    let reply = swarm
        .send(&rt, Some("1"), Message::user("get me Bob"))
        .await
        .unwrap();
    assert_eq!(reply.agent, "Carol");
    assert_eq!(reply.response.content().unwrap(), "Carol stays in charge");

    let second = &provider.requests()[1].messages;
    let result = second.last().unwrap();
    assert_eq!(result.content, "function transfer_to_Bob not available");
    assert_eq!(swarm.active(&rt, Some("1")), "Carol");
}
