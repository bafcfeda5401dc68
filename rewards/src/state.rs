//! Per-collection accrual book.

use hdn_types::{AccountAddress, Timestamp, TokenId, YieldParams};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Accrual state of a single tracked token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Current owner.
    pub owner: AccountAddress,
    /// When ownership began or rewards were last settled for this token.
    pub checkpoint: Timestamp,
}

/// The accrual book for one NFT collection.
///
/// Lightweight per-token data (owner + checkpoint) plus per-owner settled
/// balances; the (rate, end time) pair is stored once per collection, so a
/// parameter change is O(1) — no token iteration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectionYield {
    /// Rate and cutoff governing this collection's accrual.
    pub params: YieldParams,
    /// Tracked tokens, ordered by id.
    pub tokens: BTreeMap<TokenId, TokenRecord>,
    /// Reward settled (claimable) but not yet claimed, per owner.
    /// Absent entry means zero.
    pub settled: HashMap<AccountAddress, u128>,
}

impl CollectionYield {
    pub fn new(params: YieldParams) -> Self {
        Self {
            params,
            tokens: BTreeMap::new(),
            settled: HashMap::new(),
        }
    }

    /// Settled balance for an owner (zero if none).
    pub fn settled_of(&self, owner: &AccountAddress) -> u128 {
        self.settled.get(owner).copied().unwrap_or(0)
    }

    /// Live (unsettled) accrual across every token `owner` currently holds.
    ///
    /// Each token contributes independently; tokens of other owners are
    /// ignored. Returns `None` on overflow.
    pub fn live_accrual_checked(&self, owner: &AccountAddress, now: Timestamp) -> Option<u128> {
        let mut total: u128 = 0;
        for record in self.tokens.values() {
            if record.owner != *owner {
                continue;
            }
            let accrued = self.params.accrual_between(record.checkpoint, now)?;
            total = total.checked_add(accrued)?;
        }
        Some(total)
    }

    /// Settled balance plus live accrual — everything a claim would pay out.
    pub fn pending_checked(&self, owner: &AccountAddress, now: Timestamp) -> Option<u128> {
        self.live_accrual_checked(owner, now)?
            .checked_add(self.settled_of(owner))
    }

    /// Settled plus live accrual, returning 0 on overflow.
    pub fn pending(&self, owner: &AccountAddress, now: Timestamp) -> u128 {
        self.pending_checked(owner, now).unwrap_or(0)
    }
}
