//! Configuration for a restaurant shift
//!
//! Buffer sizes, staff and how long simulated work takes. Durations are
//! expressed in simulated minutes; `StationPace::minute` says how much wall
//! clock time one of them lasts.
use crate::error::{Result, ServiceError};
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_MINUTE: Duration = Duration::from_millis(100);

/// How long a station takes per meal, drawn uniformly from
/// `min_minutes..=max_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationPace {
    pub minute: Duration,
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl StationPace {
    pub fn new(min_minutes: u32, max_minutes: u32) -> Self {
        Self {
            minute: DEFAULT_MINUTE,
            min_minutes,
            max_minutes,
        }
    }

    pub fn with_minute(mut self, minute: Duration) -> Self {
        self.minute = minute;
        self
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        self.minute
            .saturating_mul(rng.gen_range(self.min_minutes..=self.max_minutes))
    }

    fn validate(&self, station: &str) -> Result<()> {
        if self.min_minutes > self.max_minutes {
            return Err(ServiceError::InvalidConfig(format!(
                "{} pace goes from {} down to {} minutes",
                station, self.min_minutes, self.max_minutes
            )));
        }
        if self.minute.checked_mul(self.max_minutes).is_none() {
            return Err(ServiceError::InvalidConfig(format!(
                "{} pace of {} minutes of {:?} does not fit in a duration",
                station, self.max_minutes, self.minute
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ShiftConfig {
    /// Slots for placed orders waiting on a chef
    pub order_capacity: usize,
    /// Slots on the pass for meals waiting on a waiter
    pub ready_capacity: usize,
    pub chefs: usize,
    pub waiters: usize,
    pub preparation: StationPace,
    pub serving: StationPace,
    pub stats_interval: Duration,
}

impl ShiftConfig {
    pub fn new() -> Self {
        Self {
            order_capacity: 10,
            ready_capacity: 5,
            chefs: 2,
            waiters: 2,
            preparation: StationPace::new(3, 8),
            serving: StationPace::new(5, 10),
            stats_interval: Duration::from_millis(3000),
        }
    }

    pub fn with_capacities(mut self, order_capacity: usize, ready_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self.ready_capacity = ready_capacity;
        self
    }

    pub fn with_staff(mut self, chefs: usize, waiters: usize) -> Self {
        self.chefs = chefs;
        self.waiters = waiters;
        self
    }

    /// Sets the wall clock length of a simulated minute for both stations.
    pub fn with_minute(mut self, minute: Duration) -> Self {
        self.preparation = self.preparation.with_minute(minute);
        self.serving = self.serving.with_minute(minute);
        self
    }

    pub fn with_preparation(mut self, preparation: StationPace) -> Self {
        self.preparation = preparation;
        self
    }

    pub fn with_serving(mut self, serving: StationPace) -> Self {
        self.serving = serving;
        self
    }

    pub fn with_stats_interval(mut self, interval: Duration) -> Self {
        self.stats_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.order_capacity == 0 || self.ready_capacity == 0 {
            return Err(ServiceError::InvalidConfig(
                "buffers need at least one slot".to_string(),
            ));
        }
        if self.chefs == 0 || self.waiters == 0 {
            return Err(ServiceError::InvalidConfig(
                "a shift needs at least one chef and one waiter".to_string(),
            ));
        }
        self.preparation.validate("preparation")?;
        self.serving.validate("serving")
    }
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self::new()
    }
}
