//! Everything a command needs: config, HTTP client, model override.

use crate::config::Config;
use agent::MemorySaver;
use anyhow::Result;
use compact_str::CompactString;
use llm::{Client, General};
use openai::OpenAI;
use runtime::Runtime;
use search::{Farcaster, Tavily, WebSearch};
use std::path::{Path, PathBuf};

/// Resolved state shared by all commands.
pub struct Session {
    pub config: Config,
    pub path: PathBuf,
    client: Client,
    model: Option<CompactString>,
}

impl Session {
    pub fn new(config: Config, path: PathBuf, model: Option<CompactString>) -> Self {
        Self {
            config,
            path,
            client: Client::new(),
            model,
        }
    }

    /// The model every command talks to unless it picks its own.
    pub fn model(&self) -> CompactString {
        self.model
            .clone()
            .unwrap_or_else(|| self.config.llm.model.clone())
    }

    /// Default chat config: the resolved model and configured temperature.
    pub fn general(&self) -> General {
        let mut general = General::new(self.model());
        general.temperature = self.config.llm.temperature;
        general
    }

    /// [`Session::general`] with a fixed temperature.
    pub fn general_at(&self, temperature: f32) -> General {
        self.general().with_temperature(temperature)
    }

    pub fn provider(&self) -> Result<OpenAI> {
        self.config.llm.provider(self.client.clone())
    }

    /// A runtime with an in-memory checkpointer.
    pub fn runtime(&self, general: General) -> Result<Runtime<OpenAI>> {
        Ok(Runtime::new(general, self.provider()?).with_checkpointer(MemorySaver::new()))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn tavily(&self, max_results: usize) -> Result<Tavily> {
        Ok(Tavily::new(self.client.clone(), &self.config.keys.tavily)?.max_results(max_results))
    }

    /// Neynar client when a key is configured.
    pub fn farcaster(&self) -> Option<Farcaster> {
        match Farcaster::new(self.client.clone(), &self.config.keys.neynar) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("{e}, farcaster tools use mock data");
                None
            }
        }
    }

    pub fn web_search(&self) -> Result<WebSearch> {
        Ok(WebSearch::new(self.client.clone(), &self.config.keys.openai)?)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.config.output.reports
    }
}
