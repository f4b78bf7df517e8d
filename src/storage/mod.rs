use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::VisitedSet;

mod file;
pub use file::FileVisitedStore;

/// Key of the visited record for a day, e.g. `vuln-2024-05-01`.
pub fn record_key(day: NaiveDate) -> String {
    format!("vuln-{}", day.format("%Y-%m-%d"))
}

/// Key of the notification audit record for a day.
pub fn audit_key(day: NaiveDate) -> String {
    format!("notified-{}", day.format("%Y-%m-%d"))
}

#[async_trait]
pub trait VisitedStore: Send + Sync {
    /// Titles recorded for the day; a missing record is an empty set.
    async fn load(&self, day: NaiveDate) -> Result<VisitedSet>;

    async fn mark_visited(&self, day: NaiveDate, title: &str) -> Result<()>;

    /// Append a notified entry to the audit record.
    async fn record_notification(&self, day: NaiveDate, title: &str, detail_url: &str)
        -> Result<()>;
}
