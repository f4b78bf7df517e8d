use serde::{Deserialize, Serialize};
use url::Url;

use super::REPLY_PREFIX;

/// One message link scraped from a day listing.
///
/// `title` is the de-duplication key, `link` is relative to the day URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub link: String,
    pub title: String,
}

impl Entry {
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
        }
    }

    pub fn is_reply(&self) -> bool {
        self.title.starts_with(REPLY_PREFIX)
    }

    /// Resolve the link against the listing URL it was scraped from.
    pub fn detail_url(&self, day_url: &Url) -> String {
        match day_url.join(&self.link) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", day_url, self.link),
        }
    }
}
