use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{post_json, Notification, NotifyChannel};
use crate::error::Result;

#[derive(Debug, Serialize)]
struct SlackPayload {
    text: String,
}

/// Slack incoming webhook (`{"text": ...}`).
pub struct SlackChannel {
    client: Client,
    webhook_url: String,
}

impl SlackChannel {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }

    fn format_message(notification: &Notification) -> String {
        format!("{}({})", notification.title, notification.detail_url)
    }
}

#[async_trait]
impl NotifyChannel for SlackChannel {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = SlackPayload {
            text: Self::format_message(notification),
        };
        post_json(&self.client, self.name(), &self.webhook_url, &payload).await?;
        Ok(())
    }
}
