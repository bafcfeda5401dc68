//! Timestamp type used throughout the protocol.
//!
//! Timestamps are Unix epoch seconds (UTC). The accrual engine never reads
//! the clock itself — callers pass `now` explicitly — so all reward math is
//! deterministic and replayable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in one day, the granularity of the yield rate.
pub const SECS_PER_DAY: u64 = 86_400;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed from this timestamp up to `later`, saturating to
    /// zero if `later` precedes it.
    pub fn elapsed_since(&self, later: Timestamp) -> u64 {
        later.0.saturating_sub(self.0)
    }

    /// This timestamp advanced by a whole number of days.
    pub fn plus_days(&self, days: u64) -> Self {
        Self(self.0.saturating_add(days * SECS_PER_DAY))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
