//! Bluesky mention source (AT Protocol XRPC, app-password session).

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PlatformError, SocialPlatform};
use crate::config::BlueskyConfig;
use crate::scan::Mention;

pub struct Bluesky {
    client: Client,
    service_url: String,
    access_jwt: String,
}

/// getPosts accepts at most 25 uris per call, while listNotifications
/// allows up to 100; larger fetches need several batches.
const GET_POSTS_MAX_URIS: usize = 25;

#[derive(Serialize)]
struct SessionRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    access_jwt: String,
}

#[derive(Debug, Deserialize)]
struct NotificationList {
    notifications: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Notification {
    uri: String,
    reason: String,
    indexed_at: String,
    author: Author,
}

#[derive(Debug, Deserialize)]
struct Author {
    handle: String,
}

#[derive(Debug, Deserialize)]
struct PostList {
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    uri: String,
    record: PostRecord,
}

#[derive(Debug, Deserialize)]
struct PostRecord {
    #[serde(default)]
    text: String,
}

impl Bluesky {
    /// Create a session with identifier + app password.
    pub async fn connect(config: &BlueskyConfig) -> Result<Self, PlatformError> {
        let client = Client::new();
        let service_url = config.service_url.trim_end_matches('/').to_string();

        let response = client
            .post(format!("{service_url}/xrpc/com.atproto.server.createSession"))
            .json(&SessionRequest {
                identifier: &config.identifier,
                password: &config.password,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::Auth(format!(
                "createSession returned {}",
                response.status()
            )));
        }
        let session: SessionResponse = response.json().await?;

        Ok(Self {
            client,
            service_url,
            access_jwt: session.access_jwt,
        })
    }

    async fn xrpc_get<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .get(format!("{}/xrpc/{method}", self.service_url))
            .query(query)
            .bearer_auth(&self.access_jwt)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                platform: "bluesky",
                status,
                body,
            });
        }
        Ok(response.json().await?)
    }
}

/// URIs of the mention notifications, in notification order.
fn mention_uris(notifications: &[Notification]) -> Vec<String> {
    notifications
        .iter()
        .filter(|n| n.reason == "mention")
        .map(|n| n.uri.clone())
        .collect()
}

/// Join mention notifications with the fetched post records. A
/// notification whose post was not returned (deleted, blocked) is
/// dropped.
fn mentions_from_notifications(notifications: Vec<Notification>, posts: Vec<Post>) -> Vec<Mention> {
    let mut text_by_uri: HashMap<String, String> = posts
        .into_iter()
        .map(|p| (p.uri, p.record.text))
        .collect();

    notifications
        .into_iter()
        .filter(|n| n.reason == "mention")
        .filter_map(|n| {
            let text = text_by_uri.remove(&n.uri)?;
            Some(Mention {
                text,
                id: n.uri,
                account: n.author.handle,
                created_at: n.indexed_at,
            })
        })
        .collect()
}

#[async_trait]
impl SocialPlatform for Bluesky {
    fn name(&self) -> &'static str {
        "bluesky"
    }

    async fn get_latest_mentions(&self, limit: usize) -> Result<Vec<Mention>, PlatformError> {
        let list: NotificationList = self
            .xrpc_get(
                "app.bsky.notification.listNotifications",
                &[("limit", limit.to_string())],
            )
            .await?;

        let uris = mention_uris(&list.notifications);
        if uris.is_empty() {
            return Ok(Vec::new());
        }

        // getPosts is batched, capped at 25 uris per call.
        let mut posts = Vec::new();
        for chunk in uris.chunks(GET_POSTS_MAX_URIS) {
            let query: Vec<(&str, String)> =
                chunk.iter().map(|uri| ("uris", uri.clone())).collect();
            let page: PostList = self.xrpc_get("app.bsky.feed.getPosts", &query).await?;
            posts.extend(page.posts);
        }

        let mentions = mentions_from_notifications(list.notifications, posts);
        debug!(count = mentions.len(), "fetched bluesky mentions");
        Ok(mentions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<Notification>, Vec<Post>) {
        let notifications: NotificationList = serde_json::from_str(
            r#"{"notifications": [
                {
                    "uri": "at://did:plc:abc/app.bsky.feed.post/1",
                    "reason": "mention",
                    "indexedAt": "2024-05-01T12:00:00.000Z",
                    "author": {"handle": "alice.bsky.social"}
                },
                {
                    "uri": "at://did:plc:def/app.bsky.feed.post/2",
                    "reason": "like",
                    "indexedAt": "2024-05-01T12:01:00.000Z",
                    "author": {"handle": "bob.bsky.social"}
                },
                {
                    "uri": "at://did:plc:ghi/app.bsky.feed.post/3",
                    "reason": "mention",
                    "indexedAt": "2024-05-01T12:02:00.000Z",
                    "author": {"handle": "carol.bsky.social"}
                }
            ]}"#,
        )
        .unwrap();
        let posts: PostList = serde_json::from_str(
            r#"{"posts": [
                {
                    "uri": "at://did:plc:abc/app.bsky.feed.post/1",
                    "record": {"text": "@jacket make it cyan", "$type": "app.bsky.feed.post"}
                }
            ]}"#,
        )
        .unwrap();
        (notifications.notifications, posts.posts)
    }

    #[test]
    fn mapping_joins_posts_and_drops_non_mentions() {
        let (notifications, posts) = fixture();
        let mentions = mentions_from_notifications(notifications, posts);

        // The like is filtered; the mention without a post is dropped.
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].text, "@jacket make it cyan");
        assert_eq!(mentions[0].id, "at://did:plc:abc/app.bsky.feed.post/1");
        assert_eq!(mentions[0].account, "alice.bsky.social");
        assert_eq!(mentions[0].created_at, "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn large_fetches_chunk_uris_and_merge_posts() {
        // 30 mention notifications: more than one getPosts batch
        let notifications: Vec<Notification> = (0..30)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "uri": format!("at://did:plc:abc/app.bsky.feed.post/{i}"),
                    "reason": "mention",
                    "indexedAt": "2024-05-01T12:00:00.000Z",
                    "author": {"handle": "alice.bsky.social"}
                }))
                .unwrap()
            })
            .collect();

        let uris = mention_uris(&notifications);
        assert_eq!(uris.len(), 30);
        let batches: Vec<_> = uris.chunks(GET_POSTS_MAX_URIS).collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 25);
        assert_eq!(batches[1].len(), 5);

        // Posts gathered across batches join back to one mention each
        let posts: Vec<Post> = uris
            .iter()
            .map(|uri| {
                serde_json::from_value(serde_json::json!({
                    "uri": uri,
                    "record": {"text": "teal? no such color"}
                }))
                .unwrap()
            })
            .collect();
        let mentions = mentions_from_notifications(notifications, posts);
        assert_eq!(mentions.len(), 30);
        assert_eq!(mentions[29].id, "at://did:plc:abc/app.bsky.feed.post/29");
    }

    #[test]
    fn non_mention_uris_are_not_fetched() {
        let (notifications, _) = fixture();
        let uris = mention_uris(&notifications);
        assert_eq!(
            uris,
            vec![
                "at://did:plc:abc/app.bsky.feed.post/1".to_string(),
                "at://did:plc:ghi/app.bsky.feed.post/3".to_string(),
            ]
        );
    }

    #[test]
    fn record_without_text_defaults_to_empty() {
        let posts: PostList =
            serde_json::from_str(r#"{"posts": [{"uri": "at://x", "record": {}}]}"#).unwrap();
        assert_eq!(posts.posts[0].record.text, "");
    }
}
