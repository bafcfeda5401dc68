//! Per-collection yield parameters and the accrual formula.
//!
//! A collection accrues `rate_per_day` raw reward units per owned token per
//! day, until `end_time`. Both values are replaceable at runtime by an
//! administrator; a zero rate or an already-passed end time are valid,
//! if degenerate, configurations rather than errors.

use crate::amount::HDN_UNIT;
use crate::time::{Timestamp, SECS_PER_DAY};
use serde::{Deserialize, Serialize};

/// The (rate, end time) pair governing accrual for one NFT collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldParams {
    /// Raw reward units accrued per token per day (18-decimal fixed point).
    pub rate_per_day: u128,

    /// No accrual happens past this moment.
    pub end_time: Timestamp,
}

impl YieldParams {
    /// Launch configuration: 10 whole HDN per token per day.
    pub const DEFAULT_RATE_PER_DAY: u128 = 10 * HDN_UNIT;

    /// Launch configuration: the yield program's scheduled end.
    pub const DEFAULT_END_TIME: u64 = 1_931_622_407;

    pub fn new(rate_per_day: u128, end_time: Timestamp) -> Self {
        Self {
            rate_per_day,
            end_time,
        }
    }

    /// The accrual clock reading for a given wall-clock `now`: time stands
    /// still once the program ends.
    pub fn effective_until(&self, now: Timestamp) -> Timestamp {
        now.min(self.end_time)
    }

    /// Reward accrued by one token between its checkpoint and `now`,
    /// clamped to the program end. Multiplies before dividing so that
    /// sub-day intervals lose no precision beyond the final truncation.
    ///
    /// Returns `None` on arithmetic overflow. A checkpoint at or past
    /// `min(now, end_time)` contributes zero — it never goes negative.
    pub fn accrual_between(&self, checkpoint: Timestamp, now: Timestamp) -> Option<u128> {
        let until = self.effective_until(now);
        let secs = checkpoint.elapsed_since(until);
        self.rate_per_day
            .checked_mul(secs as u128)
            .map(|raw| raw / SECS_PER_DAY as u128)
    }
}

impl Default for YieldParams {
    fn default() -> Self {
        Self {
            rate_per_day: Self::DEFAULT_RATE_PER_DAY,
            end_time: Timestamp::new(Self::DEFAULT_END_TIME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rate_whole_per_day: u64, end: u64) -> YieldParams {
        YieldParams::new(rate_whole_per_day as u128 * HDN_UNIT, Timestamp::new(end))
    }

    #[test]
    fn whole_days_accrue_exactly() {
        let p = params(10, u64::MAX);
        let start = Timestamp::new(1_000);
        let now = start.plus_days(7);
        assert_eq!(p.accrual_between(start, now), Some(70 * HDN_UNIT));
    }

    #[test]
    fn zero_elapsed_accrues_nothing() {
        let p = params(10, u64::MAX);
        let t = Timestamp::new(5_000);
        assert_eq!(p.accrual_between(t, t), Some(0));
    }

    #[test]
    fn checkpoint_after_now_contributes_zero() {
        let p = params(10, u64::MAX);
        let checkpoint = Timestamp::new(9_000);
        let now = Timestamp::new(1_000);
        assert_eq!(p.accrual_between(checkpoint, now), Some(0));
    }

    #[test]
    fn accrual_clamps_at_end_time() {
        let end = Timestamp::new(1_000).plus_days(3);
        let p = YieldParams::new(10 * HDN_UNIT, end);
        let start = Timestamp::new(1_000);

        // 3 days to the end, then 10 more days of dead time.
        let late = end.plus_days(10);
        assert_eq!(p.accrual_between(start, late), Some(30 * HDN_UNIT));
        assert_eq!(p.accrual_between(start, end), p.accrual_between(start, late));
    }

    #[test]
    fn checkpoint_past_end_accrues_nothing() {
        let p = params(10, 1_000);
        let minted_late = Timestamp::new(2_000);
        assert_eq!(p.accrual_between(minted_late, minted_late.plus_days(10)), Some(0));
    }

    #[test]
    fn partial_day_truncates_not_rounds() {
        // 1 HDN/day over half a day = 0.5 HDN exactly (no precision loss:
        // multiply happens before the divide).
        let p = params(1, u64::MAX);
        let start = Timestamp::new(0);
        let half_day = Timestamp::new(SECS_PER_DAY / 2);
        assert_eq!(p.accrual_between(start, half_day), Some(HDN_UNIT / 2));
    }

    #[test]
    fn overflow_returns_none() {
        let p = YieldParams::new(u128::MAX, Timestamp::new(u64::MAX));
        let start = Timestamp::new(0);
        assert_eq!(p.accrual_between(start, Timestamp::new(2)), None);
    }

    #[test]
    fn zero_rate_is_valid_and_inert() {
        let p = YieldParams::new(0, Timestamp::new(u64::MAX));
        assert_eq!(p.accrual_between(Timestamp::EPOCH, Timestamp::new(1_000_000)), Some(0));
    }
}
