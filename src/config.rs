//! Startup configuration, loaded once from a TOML file.
//!
//! Sections mirror the deployment: `[server]` for port and API key,
//! `[mastodon]` and `[bluesky]` for platform credentials. The value is
//! immutable after load and passed into the router state.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub mastodon: Option<MastodonConfig>,
    pub bluesky: Option<BlueskyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// When set, /api/v1/* requires a matching X-API-Key header.
    pub api_key: Option<String>,
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MastodonConfig {
    pub instance_url: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlueskyConfig {
    /// Handle or email.
    pub identifier: String,
    /// App password, not the account password.
    pub password: String,
    #[serde(default = "default_bluesky_service")]
    pub service_url: String,
}

fn default_bluesky_service() -> String {
    "https://bsky.social".to_string()
}

impl Config {
    /// Load from `path`. A missing file is not an error: the server
    /// can run with defaults (no platforms, no auth) and warn.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}
