//! Mastodon mention source (REST API, bearer token).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{PlatformError, SocialPlatform};
use crate::config::MastodonConfig;
use crate::scan::Mention;

pub struct Mastodon {
    client: Client,
    instance_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "type")]
    kind: String,
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: String,
    /// HTML; the scanner strips tags before matching.
    content: String,
    created_at: String,
    account: Account,
}

#[derive(Debug, Deserialize)]
struct Account {
    username: String,
}

impl Mastodon {
    /// Connect to an instance and verify the access token.
    pub async fn connect(config: &MastodonConfig) -> Result<Self, PlatformError> {
        let platform = Self {
            client: Client::new(),
            instance_url: config.instance_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        };

        let response = platform
            .client
            .get(format!(
                "{}/api/v1/accounts/verify_credentials",
                platform.instance_url
            ))
            .bearer_auth(&platform.access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::Auth(format!(
                "credential verification returned {}",
                response.status()
            )));
        }

        Ok(platform)
    }
}

/// Keep mention notifications, drop the rest (favourites, boosts,
/// follows), and flatten each status into a Mention.
fn mentions_from_notifications(notifications: Vec<Notification>) -> Vec<Mention> {
    notifications
        .into_iter()
        .filter(|n| n.kind == "mention")
        .filter_map(|n| n.status)
        .map(|status| Mention {
            text: status.content,
            id: status.id,
            account: status.account.username,
            created_at: status.created_at,
        })
        .collect()
}

#[async_trait]
impl SocialPlatform for Mastodon {
    fn name(&self) -> &'static str {
        "mastodon"
    }

    async fn get_latest_mentions(&self, limit: usize) -> Result<Vec<Mention>, PlatformError> {
        let response = self
            .client
            .get(format!("{}/api/v1/notifications", self.instance_url))
            .query(&[("limit", limit)])
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                platform: "mastodon",
                status,
                body,
            });
        }

        let notifications: Vec<Notification> = response.json().await?;
        let mentions = mentions_from_notifications(notifications);
        debug!(count = mentions.len(), "fetched mastodon mentions");
        Ok(mentions)
    }
}
