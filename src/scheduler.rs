use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Fixed-period schedule for monitor cycles.
///
/// The first tick completes immediately; a cycle that overruns the period
/// pushes the following ticks back instead of firing them in a burst.
pub struct Ticker {
    interval: Interval,
    period: Duration,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, period }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
