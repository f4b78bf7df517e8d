use chrono::{NaiveDate, Utc};
use std::sync::Mutex;

/// Source of the current UTC calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a settable day.
pub struct FixedClock {
    day: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: Mutex::new(day),
        }
    }

    /// Move to the next calendar day.
    pub fn advance_day(&self) {
        let mut day = self.day.lock().unwrap_or_else(|e| e.into_inner());
        *day = day.succ_opt().unwrap_or(*day);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.day.lock().unwrap_or_else(|e| e.into_inner())
    }
}
