//! End-of-tick pause

use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::consts::FIXED_DELAY_MS;

/// How the loop waits between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Sleep for whatever is left of the tick period
    #[default]
    FixedRate,
    /// Always sleep the same amount, regardless of how long the tick took.
    /// Drifts slower than the nominal rate by the work done per tick.
    FixedDelay,
}

impl Pacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pacing::FixedRate => "fixed_rate",
            Pacing::FixedDelay => "fixed_delay",
        }
    }
}

/// Blocks the loop after each update+render cycle
#[derive(Debug)]
pub struct TickScheduler {
    pacing: Pacing,
    period: Duration,
    tick_started: Instant,
}

impl TickScheduler {
    pub fn new(pacing: Pacing, ticks_per_second: u32) -> Self {
        Self {
            pacing,
            period: Duration::from_secs(1) / ticks_per_second.max(1),
            tick_started: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// How long to sleep after a tick that took `elapsed`
    pub fn sleep_for(&self, elapsed: Duration) -> Duration {
        match self.pacing {
            Pacing::FixedRate => self.period.saturating_sub(elapsed),
            Pacing::FixedDelay => Duration::from_millis(FIXED_DELAY_MS),
        }
    }

    /// Sleep out the rest of the current tick and start timing the next one
    pub fn pause(&mut self) {
        let elapsed = self.tick_started.elapsed();
        let wait = self.sleep_for(elapsed);
        if elapsed > self.period {
            log::trace!("tick overran by {:?}", elapsed - self.period);
        }
        thread::sleep(wait);
        self.tick_started = Instant::now();
    }
}
