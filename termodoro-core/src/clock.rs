//! Clock source driving the phase engine.

use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// A stoppable periodic tick.
///
/// While stopped, [`Clock::tick`] never resolves, so it can sit in a
/// `select!` arm next to input handling without spinning. Restarting begins a
/// fresh period; time spent stopped is never delivered later.
#[derive(Debug)]
pub struct Clock {
    period: Duration,
    interval: Option<Interval>,
}

impl Clock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Begins ticking one period from now. No-op when already running.
    pub fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        tracing::debug!(period = ?self.period, "clock started");
    }

    /// Stops ticking. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            tracing::debug!("clock stopped");
        }
    }

    /// Starts or stops the clock to match `running`.
    pub fn set_running(&mut self, running: bool) {
        if running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
