//! Destination for claimed rewards.

use hdn_types::{AccountAddress, RewardAmount};
use thiserror::Error;

/// Failure reported by a [`RewardSink`] when a credit is refused
/// (missing treasury role, supply cap, backend failure).
#[derive(Debug, Error)]
#[error("reward sink rejected credit: {0}")]
pub struct SinkError(String);

impl SinkError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Where claimed rewards land — implemented by the reward ledger.
///
/// The engine credits the full claim total through this trait *before*
/// mutating its own state, so a refused credit leaves accrual untouched.
pub trait RewardSink {
    fn credit(&mut self, to: &AccountAddress, amount: RewardAmount) -> Result<(), SinkError>;
}
