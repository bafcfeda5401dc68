//! Treasury capability binding the yield manager to the ledger.

use crate::ledger::RewardLedger;
use hdn_rewards::{RewardSink, SinkError};
use hdn_types::{AccountAddress, RewardAmount};

/// A minting capability scoped to one treasurer identity.
///
/// Constructed at wiring time with the yield manager's address; every
/// credit goes through the ledger's normal role check, so revoking the
/// treasury role immediately disables claims.
pub struct TreasuryGate<'a> {
    ledger: &'a mut RewardLedger,
    treasurer: AccountAddress,
}

impl<'a> TreasuryGate<'a> {
    pub fn new(ledger: &'a mut RewardLedger, treasurer: AccountAddress) -> Self {
        Self { ledger, treasurer }
    }
}

impl RewardSink for TreasuryGate<'_> {
    fn credit(&mut self, to: &AccountAddress, amount: RewardAmount) -> Result<(), SinkError> {
        self.ledger
            .mint(&self.treasurer, to, amount)
            .map_err(|e| SinkError::new(e.to_string()))
    }
}
