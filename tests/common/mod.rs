#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

use vuln_monitor::error::{MonitorError, Result};
use vuln_monitor::models::VisitedSet;
use vuln_monitor::notifiers::{Notification, NotifyChannel};
use vuln_monitor::scrapers::ArchiveSource;
use vuln_monitor::storage::VisitedStore;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Day page in the archive's layout: one top-level list of message links.
pub fn listing(entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(href, title)| format!("<li><a href=\"{href}\">{title}</a> (someone)</li>\n"))
        .collect();
    format!(
        "<html><head><title>oss-security</title></head><body>\n<h2>Messages</h2>\n<ul>\n{items}</ul>\n</body></html>"
    )
}

/// Archive serving whatever page is currently set; `None` fails the fetch.
#[derive(Clone, Default)]
pub struct FakeArchive {
    page: Arc<Mutex<Option<String>>>,
    fetches: Arc<AtomicUsize>,
}

impl FakeArchive {
    pub fn serving(page: String) -> Self {
        let archive = Self::default();
        archive.set_page(Some(page));
        archive
    }

    pub fn set_page(&self, page: Option<String>) {
        *self.page.lock().unwrap() = page;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArchiveSource for FakeArchive {
    fn day_url(&self, day: NaiveDate) -> Result<Url> {
        Ok(Url::parse(&format!(
            "https://archive.test/lists/oss-security/{}",
            day.format("%Y/%m/%d/")
        ))
        .unwrap())
    }

    async fn fetch_listing(&self, url: &Url) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.page.lock().unwrap().clone().ok_or_else(|| MonitorError::Fetch {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

/// Channel that remembers everything it was asked to send.
#[derive(Clone)]
pub struct RecordingChannel {
    name: &'static str,
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sent: Arc::default(),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.sent().into_iter().map(|n| n.title).collect()
    }
}

#[async_trait]
impl NotifyChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Channel whose transport always fails.
pub struct FailingChannel;

#[async_trait]
impl NotifyChannel for FailingChannel {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _notification: &Notification) -> Result<()> {
        Err(MonitorError::delivery("failing", "unexpected status code: 500"))
    }
}

/// In-memory store; with `broken` set every operation fails.
#[derive(Clone, Default)]
pub struct MemoryStore {
    days: Arc<Mutex<HashMap<NaiveDate, Vec<String>>>>,
    audit: Arc<Mutex<Vec<(String, String)>>>,
    broken: bool,
}

impl MemoryStore {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn titles(&self, day: NaiveDate) -> Vec<String> {
        self.days.lock().unwrap().get(&day).cloned().unwrap_or_default()
    }

    pub fn audit(&self) -> Vec<(String, String)> {
        self.audit.lock().unwrap().clone()
    }

    fn failure(&self) -> MonitorError {
        MonitorError::persistence(
            "/unwritable/vuln.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        )
    }
}

#[async_trait]
impl VisitedStore for MemoryStore {
    async fn load(&self, day: NaiveDate) -> Result<VisitedSet> {
        if self.broken {
            return Err(self.failure());
        }
        Ok(self.titles(day).into_iter().collect())
    }

    async fn mark_visited(&self, day: NaiveDate, title: &str) -> Result<()> {
        if self.broken {
            return Err(self.failure());
        }
        self.days
            .lock()
            .unwrap()
            .entry(day)
            .or_default()
            .push(title.to_string());
        Ok(())
    }

    async fn record_notification(
        &self,
        _day: NaiveDate,
        title: &str,
        detail_url: &str,
    ) -> Result<()> {
        if self.broken {
            return Err(self.failure());
        }
        self.audit
            .lock()
            .unwrap()
            .push((title.to_string(), detail_url.to_string()));
        Ok(())
    }
}
