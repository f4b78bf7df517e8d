use async_trait::async_trait;
use chrono::NaiveDate;
use url::Url;

use crate::error::Result;

pub mod archive;

pub use archive::{MailingListArchive, DEFAULT_ARCHIVE_URL};

/// Where day listings come from.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Listing URL for one UTC calendar day.
    fn day_url(&self, day: NaiveDate) -> Result<Url>;

    /// Raw listing content for a day URL.
    async fn fetch_listing(&self, url: &Url) -> Result<String>;
}
