//! Token amount types for the HDN reward asset and the native payment coin.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; one whole token is `HDN_UNIT` raw units
//! (18 decimal places, matching the reward asset's precision).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Raw units per whole token: 10^18.
pub const HDN_UNIT: u128 = 1_000_000_000_000_000_000;

/// HDN amount — the fungible reward asset credited on claim.
///
/// Internally stored as raw units (u128) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RewardAmount(u128);

impl RewardAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Build an amount from whole tokens (`n × 10^18` raw).
    pub fn from_whole(tokens: u64) -> Self {
        Self(tokens as u128 * HDN_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Whole-token part of this amount (raw / 10^18, truncating).
    pub fn whole(&self) -> u128 {
        self.0 / HDN_UNIT
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for RewardAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for RewardAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for RewardAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} HDN", self.0)
    }
}

/// Native coin amount — what minters pay for an NFT.
///
/// Same 18-decimal fixed-point representation as [`RewardAmount`], kept as
/// a distinct type so reward math and payment handling cannot be mixed up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NativeAmount(u128);

impl NativeAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Build an amount from whole coins (`n × 10^18` raw).
    pub fn from_whole(coins: u64) -> Self {
        Self(coins as u128 * HDN_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for NativeAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_token_conversion() {
        let fifty = RewardAmount::from_whole(50);
        assert_eq!(fifty.raw(), 50 * HDN_UNIT);
        assert_eq!(fifty.whole(), 50);
    }

    #[test]
    fn checked_sub_underflow_is_none() {
        let a = RewardAmount::new(1);
        let b = RewardAmount::new(2);
        assert!(a.checked_sub(b).is_none());
        assert_eq!(a.saturating_sub(b), RewardAmount::ZERO);
    }

    #[test]
    fn native_amount_accumulates() {
        let price = NativeAmount::from_whole(500);
        let total = price.checked_add(price).unwrap();
        assert_eq!(total.raw(), 1000 * HDN_UNIT);
    }
}
