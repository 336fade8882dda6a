//! Plain chat, one-shot or interactive.

use crate::session::Session;
use agent::{Agent, Thread};
use anyhow::Result;
use clap::Args;
use futures_util::StreamExt;
use llm::Message;
use openai::OpenAI;
use runtime::Runtime;
use std::{io::Write, pin::pin};
use tokio::io::{AsyncBufReadExt, BufReader};

const AGENT: &str = "chatbot";

/// Chat with the model.
#[derive(Args, Debug)]
pub struct Chat {
    /// Message to send. Starts an interactive session when omitted.
    pub message: Option<String>,

    /// Thread id for conversation memory.
    #[arg(long)]
    pub thread: Option<String>,
}

impl Chat {
    pub async fn run(self, session: &Session) -> Result<()> {
        let mut rt = session.runtime(session.general())?;
        rt.add_agent(Agent::new(AGENT));

        let thread = self
            .thread
            .unwrap_or_else(|| Thread::new_id().to_string());
        match self.message {
            Some(message) => {
                let response = rt.send(AGENT, Some(thread.as_str()), Message::user(message)).await?;
                println!("{}", response.content().cloned().unwrap_or_default());
                Ok(())
            }
            None => repl(&rt, &thread).await,
        }
    }
}

/// Read lines from stdin until EOF, streaming each answer.
async fn repl(rt: &Runtime<OpenAI>, thread: &str) -> Result<()> {
    println!("Scout chat, thread {thread} (Ctrl+D to exit)");
    println!("---");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut stream = pin!(rt.stream(AGENT, Some(thread), Message::user(line)));
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(chunk) => {
                    if let Some(text) = chunk.content() {
                        print!("{text}");
                        std::io::stdout().flush().ok();
                    }
                }
                Err(e) => {
                    eprintln!("\nError: {e}");
                    break;
                }
            }
        }
        println!();
    }
    Ok(())
}
