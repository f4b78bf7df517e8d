use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::{post_json, Notification, NotifyChannel};
use crate::error::Result;

/// Discord webhook (`{"content": ...}`); Discord answers 204 on success.
pub struct DiscordChannel {
    client: Client,
    webhook_url: String,
}

impl DiscordChannel {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl NotifyChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = json!({
            "content": format!("{}\n{}", notification.title, notification.detail_url)
        });

        post_json(&self.client, self.name(), &self.webhook_url, &payload).await?;
        info!("Successfully sent Discord notification for {}", notification.title);
        Ok(())
    }
}
