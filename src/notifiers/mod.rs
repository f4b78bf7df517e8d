//! Webhook notification channels.
//!
//! Every configured channel receives each notification independently; a
//! failing channel never prevents delivery to the others.

pub mod dingtalk;
pub mod discord;
pub mod slack;

pub use dingtalk::DingTalkChannel;
pub use discord::DiscordChannel;
pub use slack::SlackChannel;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{MonitorError, Result};

/// Longest response body excerpt carried in a delivery error.
const MAX_ERROR_BODY: usize = 200;

/// A matched entry ready to be announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub detail_url: String,
    /// Keyword that selected the entry; `None` when no keywords are configured.
    pub keyword: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail_url: detail_url.into(),
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = keyword.map(str::to_string);
        self
    }
}

#[async_trait]
pub trait NotifyChannel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Outcome of one channel for one notification.
#[derive(Debug)]
pub struct DeliveryReport {
    pub channel: &'static str,
    pub result: Result<()>,
}

/// Fans a notification out to all configured channels.
#[derive(Default)]
pub struct Notifier {
    channels: Vec<Box<dyn NotifyChannel>>,
}

impl Notifier {
    pub fn new(channels: Vec<Box<dyn NotifyChannel>>) -> Self {
        Self { channels }
    }

    /// Channels for every non-empty webhook in the configuration.
    pub fn from_config(config: &Config, client: &Client) -> Self {
        let mut channels: Vec<Box<dyn NotifyChannel>> = Vec::new();

        if let Some(url) = config.slack_webhook() {
            channels.push(Box::new(SlackChannel::new(client.clone(), url)));
        }
        if let Some(url) = config.dingtalk_webhook() {
            channels.push(Box::new(DingTalkChannel::new(client.clone(), url)));
        }
        if let Some(url) = config.discord_webhook() {
            channels.push(Box::new(DiscordChannel::new(client.clone(), url)));
        }

        if channels.is_empty() {
            warn!("No notification channels configured, matches will only be logged");
        }

        Self { channels }
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Send to every channel concurrently; reports come back in channel order.
    pub async fn dispatch(&self, notification: &Notification) -> Vec<DeliveryReport> {
        let sends = self.channels.iter().map(|channel| async move {
            let result = channel.send(notification).await;
            if result.is_ok() {
                debug!(channel = channel.name(), title = %notification.title, "Notification sent");
            }
            DeliveryReport {
                channel: channel.name(),
                result,
            }
        });

        join_all(sends).await
    }
}

/// POST a JSON payload and return the response body of a 2xx reply.
pub(crate) async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    channel: &str,
    webhook_url: &str,
    payload: &T,
) -> Result<String> {
    let response = client
        .post(webhook_url)
        .json(payload)
        .send()
        .await
        .map_err(|e| MonitorError::delivery(channel, format!("request failed: {e}")))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.is_success() {
        Ok(body)
    } else {
        Err(MonitorError::delivery(
            channel,
            format!("unexpected status code: {}, response: {}", status, excerpt(&body)),
        ))
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
