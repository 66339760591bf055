//! Social platform mention sources.
//!
//! Each platform implements the one capability the core needs: fetch
//! the latest mentions of the configured account, newest first. The
//! scanner never learns which platform a mention came from.

mod bluesky;
mod mastodon;

pub use bluesky::Bluesky;
pub use mastodon::Mastodon;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::scan::Mention;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{platform} API returned {status}: {body}")]
    Api {
        platform: &'static str,
        status: u16,
        body: String,
    },
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// A source of mentions for the configured account.
#[async_trait]
pub trait SocialPlatform: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch up to `limit` mentions, newest first. Mention text is
    /// returned as the platform delivers it (Mastodon sends HTML).
    async fn get_latest_mentions(&self, limit: usize) -> Result<Vec<Mention>, PlatformError>;
}

/// Connect every platform present in the config. A platform that
/// fails to connect is logged and skipped rather than aborting
/// startup; the first successful one becomes the active default.
pub async fn connect_all(config: &Config) -> Vec<Arc<dyn SocialPlatform>> {
    let mut platforms: Vec<Arc<dyn SocialPlatform>> = Vec::new();

    if let Some(cfg) = &config.mastodon {
        match Mastodon::connect(cfg).await {
            Ok(p) => {
                info!("mastodon platform initialized");
                platforms.push(Arc::new(p));
            }
            Err(e) => warn!(error = %e, "failed to initialize mastodon"),
        }
    }

    if let Some(cfg) = &config.bluesky {
        match Bluesky::connect(cfg).await {
            Ok(p) => {
                info!("bluesky platform initialized");
                platforms.push(Arc::new(p));
            }
            Err(e) => warn!(error = %e, "failed to initialize bluesky"),
        }
    }

    if platforms.is_empty() {
        warn!("no platforms initialized, check the config file");
    }

    platforms
}
