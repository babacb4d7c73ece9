//! Chat client configuration file support
//!
//! Loads configuration from ~/.config/a2a-chat/config.toml

use a2a_chat_agent::{DEFAULT_AGENT_CARD, DelayRange, MockAgentClient, MockTiming};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Chat client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Chat view settings
    #[serde(default)]
    pub chat: ChatConfig,
    /// Simulated agent settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Simulated latencies
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Stream replies word by word instead of waiting for the full text
    #[serde(default = "default_true")]
    pub stream_replies: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            stream_replies: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_card")]
    pub agent_card: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_card: default_agent_card(),
        }
    }
}

/// Delays in milliseconds; ranges are `[min, max)`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub init_delay_ms: u64,
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
    pub chunk_delay_min_ms: u64,
    pub chunk_delay_max_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        let timing = MockTiming::default();
        Self {
            init_delay_ms: timing.init_delay.as_millis() as u64,
            reply_delay_min_ms: timing.reply_delay.min_ms,
            reply_delay_max_ms: timing.reply_delay.max_ms,
            chunk_delay_min_ms: timing.chunk_delay.min_ms,
            chunk_delay_max_ms: timing.chunk_delay.max_ms,
        }
    }
}

impl TimingConfig {
    pub fn to_mock_timing(&self) -> MockTiming {
        MockTiming {
            init_delay: Duration::from_millis(self.init_delay_ms),
            reply_delay: DelayRange::new(self.reply_delay_min_ms, self.reply_delay_max_ms),
            chunk_delay: DelayRange::new(self.chunk_delay_min_ms, self.chunk_delay_max_ms),
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, or from the default path when `None`
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from_path(Some(path.to_path_buf())),
            None => Self::load_from_path(Self::default_path()),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// Missing or unreadable files fall back to defaults.
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "Failed to parse config: {err}");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), "Failed to read config: {err}");
                Self::default()
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("a2a-chat").join("config.toml"))
    }

    /// Build the simulated agent described by this configuration
    pub fn build_transport(&self) -> MockAgentClient {
        MockAgentClient::new()
            .with_agent_card(self.agent.agent_card.clone())
            .with_timing(self.timing.to_mock_timing())
    }
}

fn default_title() -> String {
    "Travel Assistant".to_string()
}

fn default_agent_card() -> String {
    DEFAULT_AGENT_CARD.to_string()
}

fn default_true() -> bool {
    true
}
