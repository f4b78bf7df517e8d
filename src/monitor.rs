//! The polling cycle: fetch, extract, de-duplicate, filter, notify, persist.

use chrono::NaiveDate;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::error::{MonitorError, Result};
use crate::filter::KeywordSet;
use crate::models::VisitedSet;
use crate::notifiers::{Notification, Notifier};
use crate::parsers::extract_entries;
use crate::scheduler::Ticker;
use crate::scrapers::ArchiveSource;
use crate::storage::VisitedStore;
use crate::utils::clock::Clock;

/// De-duplication state carried from one cycle to the next.
///
/// Only titles for `day` are held; a new day starts from an empty set.
#[derive(Debug, Default)]
pub struct MonitorState {
    pub day: Option<NaiveDate>,
    pub visited: VisitedSet,
}

/// Counters for one successful cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub day: Option<NaiveDate>,
    pub entries: usize,
    pub replies_skipped: usize,
    pub already_visited: usize,
    pub filtered_out: usize,
    pub matched: usize,
    pub delivery_failures: usize,
}

pub struct Monitor {
    source: Box<dyn ArchiveSource>,
    store: Box<dyn VisitedStore>,
    notifier: Notifier,
    keywords: KeywordSet,
    clock: Arc<dyn Clock>,
    state: MonitorState,
}

impl Monitor {
    pub fn new(
        source: Box<dyn ArchiveSource>,
        store: Box<dyn VisitedStore>,
        notifier: Notifier,
        keywords: KeywordSet,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            store,
            notifier,
            keywords,
            clock,
            state: MonitorState::default(),
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run cycles on the ticker's schedule; `None` runs forever.
    pub async fn run(&mut self, ticker: &mut Ticker, max_cycles: Option<u64>) {
        let mut cycles = 0u64;

        loop {
            ticker.tick().await;
            info!("--- Starting check cycle for {} ---", self.clock.today());
            let started = Instant::now();

            match self.run_cycle().await {
                Ok(report) => info!(
                    entries = report.entries,
                    matched = report.matched,
                    already_visited = report.already_visited,
                    delivery_failures = report.delivery_failures,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Check cycle completed"
                ),
                Err(e) if e.aborts_cycle() => error!("Failed to fetch and parse content: {}", e),
                Err(e) => error!("Check cycle failed: {}", e),
            }

            cycles += 1;
            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }
            info!("Waiting {} seconds until next cycle", ticker.period().as_secs());
        }
    }

    /// One full pass over today's listing.
    ///
    /// Fetch, parse and empty-listing failures return before any state is
    /// touched. Delivery and persistence failures are logged and the cycle
    /// carries on.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let day = self.clock.today();
        let day_url = self.source.day_url(day)?;

        let html = self.source.fetch_listing(&day_url).await?;
        let entries = extract_entries(&html)?;
        if entries.is_empty() {
            return Err(MonitorError::NoItems {
                url: day_url.to_string(),
            });
        }
        debug!(url = %day_url, entries = entries.len(), "Extracted listing");

        self.refresh_state(day).await;

        let mut report = CycleReport {
            day: Some(day),
            entries: entries.len(),
            ..CycleReport::default()
        };

        for entry in entries {
            if entry.is_reply() {
                report.replies_skipped += 1;
                continue;
            }
            if self.state.visited.contains(&entry.title) {
                report.already_visited += 1;
                continue;
            }

            if self.keywords.matches(&entry.title) {
                let notification = Notification::new(&entry.title, entry.detail_url(&day_url))
                    .with_keyword(self.keywords.first_match(&entry.title));
                report.matched += 1;
                report.delivery_failures += self.notify(day, &notification).await;
            } else {
                report.filtered_out += 1;
            }

            // Marked regardless of delivery outcome: at most one attempt per day
            self.state.visited.insert(entry.title.clone());
            if let Err(e) = self.store.mark_visited(day, &entry.title).await {
                error!(title = %entry.title, error = %e, "Failed to persist visited title");
            }
        }

        Ok(report)
    }

    /// Send to every channel and append to the audit record; returns the
    /// number of channels that failed.
    async fn notify(&self, day: NaiveDate, notification: &Notification) -> usize {
        info!(
            title = %notification.title,
            url = %notification.detail_url,
            keyword = notification.keyword.as_deref().unwrap_or("*"),
            "New matching message"
        );

        let mut failures = 0;
        for delivery in self.notifier.dispatch(notification).await {
            if let Err(e) = delivery.result {
                error!(
                    channel = delivery.channel,
                    title = %notification.title,
                    error = %e,
                    "Failed to send notification"
                );
                failures += 1;
            }
        }

        if let Err(e) = self
            .store
            .record_notification(day, &notification.title, &notification.detail_url)
            .await
        {
            error!(title = %notification.title, error = %e, "Failed to append audit record");
        }

        failures
    }

    /// Align in-memory state with today's persisted record.
    async fn refresh_state(&mut self, day: NaiveDate) {
        if self.state.day != Some(day) {
            if let Some(previous) = self.state.day {
                info!("Day rolled over from {} to {}, starting a fresh visited set", previous, day);
            }
            self.state = MonitorState {
                day: Some(day),
                visited: VisitedSet::new(),
            };
        }

        match self.store.load(day).await {
            Ok(persisted) => self.state.visited.merge(persisted),
            Err(e) => warn!(
                error = %e,
                known = self.state.visited.len(),
                "Failed to load visited record, continuing with in-memory titles"
            ),
        }
    }
}
