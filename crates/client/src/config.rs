//! Agent configuration: optional TOML file, then environment overrides.
use std::env;
use std::path::Path;
use std::time::Duration;

use agent_runtime::{ChatConfig, RetryPolicy};
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub chat: ChatConfig,
    pub retry: RetryConfig,
    pub bridge: BridgeConfig,
    /// Log subdirectory name (default: `session_<unix seconds>`).
    pub session_id: Option<String>,
    /// Log root (default: platform cache directory).
    pub log_dir: Option<std::path::PathBuf>,
}

impl AgentConfig {
    /// Loads `path` if given, then applies environment overrides.
    ///
    /// Environment variables:
    /// - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL` - Chat service
    /// - `CHAT_MAX_TRIES` - Completion attempts before giving up (default: 100)
    /// - `AGENT_SESSION_ID` - Log session name (default: auto-generated)
    /// - `AGENT_LOG_DIR` - Log root (default: platform-specific)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        self.chat.apply_env();

        if let Some(tries) = read_env::<u32>("CHAT_MAX_TRIES") {
            self.retry.max_tries = tries.max(1);
        }
        if let Some(session) = read_env::<String>("AGENT_SESSION_ID") {
            self.session_id = Some(session);
        }
        if let Some(dir) = read_env::<String>("AGENT_LOG_DIR") {
            self.log_dir = Some(dir.into());
        }
    }
}

/// Completion retry budget, delays in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_tries: u32,
    pub base_delay_secs: u64,
    pub max_delay_secs: u64,
    pub rate_limit_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_tries: policy.max_tries,
            base_delay_secs: policy.base_delay.as_secs(),
            max_delay_secs: policy.max_delay.as_secs(),
            rate_limit_secs: policy.rate_limit_delay.as_secs(),
        }
    }
}

impl RetryConfig {
    /// Retry policy with at least one attempt.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_tries: self.max_tries.max(1),
            base_delay: Duration::from_secs(self.base_delay_secs),
            max_delay: Duration::from_secs(self.max_delay_secs),
            rate_limit_delay: Duration::from_secs(self.rate_limit_secs),
        }
    }
}

/// Command hosting the engine bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["-m".to_string(), "nle_bridge".to_string()],
        }
    }
}

impl BridgeConfig {
    /// Replaces the configured command with `command` unless it is empty.
    pub fn override_with(&mut self, command: &[String]) {
        if let Some((program, args)) = command.split_first() {
            self.program = program.clone();
            self.args = args.to_vec();
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
