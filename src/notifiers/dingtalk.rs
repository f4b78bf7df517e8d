use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{post_json, Notification, NotifyChannel};
use crate::error::{MonitorError, Result};

/// DingTalk replies 200 even on failure and reports the outcome here.
#[derive(Debug, Deserialize)]
struct DingTalkReply {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// DingTalk robot webhook (`{"msgtype": "text", ...}`).
pub struct DingTalkChannel {
    client: Client,
    webhook_url: String,
}

impl DingTalkChannel {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl NotifyChannel for DingTalkChannel {
    fn name(&self) -> &'static str {
        "dingtalk"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = json!({
            "msgtype": "text",
            "text": {
                "content": format!("{} {}", notification.title, notification.detail_url)
            }
        });

        let body = post_json(&self.client, self.name(), &self.webhook_url, &payload).await?;

        // Non-JSON bodies are accepted on status alone
        if let Ok(reply) = serde_json::from_str::<DingTalkReply>(&body) {
            if reply.errcode != 0 {
                return Err(MonitorError::delivery(
                    self.name(),
                    format!("errcode {}: {}", reply.errcode, reply.errmsg),
                ));
            }
        }

        Ok(())
    }
}
