use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::error::{MonitorError, Result};
use crate::scrapers::ArchiveSource;
use crate::utils::http::fetch_page;

pub const DEFAULT_ARCHIVE_URL: &str = "https://www.openwall.com/lists/oss-security/";

/// A mailing-list archive laid out as `<base>/<YYYY>/<MM>/<DD>/`.
pub struct MailingListArchive {
    client: Client,
    base_url: Url,
}

impl MailingListArchive {
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| MonitorError::Config(format!("invalid archive url {base_url:?}: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ArchiveSource for MailingListArchive {
    fn day_url(&self, day: NaiveDate) -> Result<Url> {
        let relative = day.format("%Y/%m/%d/").to_string();
        self.base_url
            .join(&relative)
            .map_err(|e| MonitorError::Fetch {
                url: format!("{}{}", self.base_url, relative),
                reason: e.to_string(),
            })
    }

    async fn fetch_listing(&self, url: &Url) -> Result<String> {
        info!("Fetching listing {}", url);
        fetch_page(&self.client, url.as_str()).await
    }
}
