//! `scout` settings: model provider, search keys and output paths.
//!
//! The file is looked up as `--config`, then `.scout/config.toml` in the
//! working directory, then `scout/config.toml` under the user config dir.
//! Only the last one is created on demand.

use anyhow::{Context, Result};
use compact_str::CompactString;
use llm::Client;
use openai::OpenAI;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config directory name under platform config dir.
pub const CONFIG_DIR: &str = "scout";
/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Default config template generated when no config exists.
pub const DEFAULT_CONFIG: &str = r#"[llm]
provider = "openai"
model = "gpt-4o-mini"
api_key = "${OPENAI_API_KEY}"

[keys]
tavily = "${TAVILY_API_KEY}"
neynar = "${NEYNAR_API_KEY}"
openai = "${OPENAI_API_KEY}"

[output]
reports = "reports"
"#;

/// Top-level CLI configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat model provider.
    #[serde(default)]
    pub llm: LlmConfig,
    /// API keys of the search services.
    #[serde(default)]
    pub keys: Keys,
    /// Where generated files go.
    #[serde(default)]
    pub output: Output,
}

/// LLM provider configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Which LLM provider to use.
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model identifier.
    pub model: CompactString,
    /// API key (supports `${ENV_VAR}` expansion).
    #[serde(default)]
    pub api_key: String,
    /// Optional base URL override for the chat completions endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Default sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAI,
            model: "gpt-4o-mini".into(),
            api_key: String::new(),
            base_url: None,
            temperature: None,
        }
    }
}

/// Supported LLM provider kinds, all speaking the OpenAI wire format.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI API (default).
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    /// Groq API.
    Groq,
    /// DeepSeek API.
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// Ollama local API, no key required.
    Ollama,
}

/// Search service keys. Empty means unavailable.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Keys {
    pub tavily: String,
    pub neynar: String,
    /// Key for the OpenAI web search model, independent of `[llm]`.
    pub openai: String,
}

/// Output locations.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Directory for generated markdown reports.
    pub reports: PathBuf,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            reports: PathBuf::from("reports"),
        }
    }
}

impl Config {
    /// Parse a TOML string, expanding environment variables first.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(&expand_env_vars(source))?)
    }

    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml(&source)
    }
}

impl LlmConfig {
    /// Build the chat provider this section describes.
    pub fn provider(&self, client: Client) -> Result<OpenAI> {
        if let Some(url) = &self.base_url {
            return OpenAI::custom(client, &self.api_key, url);
        }
        match self.provider {
            ProviderKind::OpenAI => OpenAI::api(client, &self.api_key),
            ProviderKind::Groq => OpenAI::groq(client, &self.api_key),
            ProviderKind::DeepSeek => OpenAI::deepseek(client, &self.api_key),
            ProviderKind::Ollama => OpenAI::ollama(client),
        }
    }
}

/// Resolve the config path following the priority chain, without creating
/// anything.
pub fn resolve_config_path(config_flag: Option<&Path>) -> PathBuf {
    if let Some(path) = config_flag {
        return path.to_path_buf();
    }

    let workspace_path = PathBuf::from(".scout").join(CONFIG_FILE);
    if workspace_path.exists() {
        return workspace_path;
    }

    global_config_path()
}

/// Resolve and load the config, generating the global default on first run.
pub fn resolve_config(config_flag: Option<&Path>) -> Result<(PathBuf, Config)> {
    let path = resolve_config_path(config_flag);
    if config_flag.is_none() && !path.exists() {
        generate_default_config(&path)?;
        tracing::info!("generated default config at {}", path.display());
    }

    let config = Config::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    Ok((path, config))
}

/// `scout/config.toml` under the platform config dir.
pub fn global_config_path() -> PathBuf {
    let base = match dirs::config_dir() {
        Some(dir) => dir,
        None => dirs::home_dir().unwrap_or_default().join(".config"),
    };
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Write [`DEFAULT_CONFIG`] to `path`.
pub fn generate_default_config(path: &Path) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    std::fs::write(path, DEFAULT_CONFIG).with_context(|| format!("cannot write {}", path.display()))
}

/// Replace each `${NAME}` with the value of the environment variable
/// `NAME`. Unset variables become empty; an unterminated `${` is kept as is.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        out.push_str(&std::env::var(&after[..close]).unwrap_or_default());
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
