//! Configuration for the companion engine
//!
//! Non-secret settings live in `~/.lifebuddy/config.toml`; the
//! language-model API key is only ever read from the `GROQ_API_KEY`
//! environment variable so it never lands in a file or in source.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::chat::client::{DEFAULT_API_URL, DEFAULT_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub video: VideoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Chat-completion API base URL
    pub api_url: String,
    /// Model identifier
    pub model: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VideoConfig {
    /// Microsoft voice id used by the hosted talking-head provider
    pub voice_id: Option<String>,
    /// Base URL of a self-hosted talker server, if any
    pub talker_url: Option<String>,
}

impl Config {
    /// Load configuration from file, creating a default one if it doesn't
    /// exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".lifebuddy").join("config.toml"))
    }

    /// The chat API key, from the environment only
    pub fn api_key() -> Option<String> {
        std::env::var("GROQ_API_KEY").ok()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chat: ChatConfig::default(),
            video: VideoConfig::default(),
        }
    }
}
