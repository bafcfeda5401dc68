//! NFT collection state and operations.

use crate::error::RegistryError;
use hdn_rewards::{RewardSink, YieldEngine};
use hdn_types::{AccountAddress, NativeAmount, RewardAmount, Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One NFT collection: ownership records plus mint economics.
///
/// The collection's own address holds the yield role in the engine and is
/// passed as the caller on every ownership report, so reward bookkeeping
/// cannot be driven from outside the collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collection {
    address: AccountAddress,
    name: String,
    symbol: String,
    /// Native coin required per mint. Overpayment is kept as proceeds.
    mint_price: NativeAmount,
    /// Hard limit on the number of tokens, if any.
    max_supply: Option<u64>,
    /// Next unassigned id; doubles as the total minted so far.
    next_id: u64,
    owners: BTreeMap<TokenId, AccountAddress>,
    /// Native coin collected from mints.
    proceeds: NativeAmount,
}

impl Collection {
    pub const NAME: &'static str = "Astronut";
    pub const SYMBOL: &'static str = "NUT";
    /// Launch mint price: 500 whole native coins.
    pub const DEFAULT_MINT_PRICE: u128 = 500 * hdn_types::HDN_UNIT;

    pub fn new(
        address: AccountAddress,
        name: impl Into<String>,
        symbol: impl Into<String>,
        mint_price: NativeAmount,
        max_supply: Option<u64>,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            mint_price,
            max_supply,
            next_id: 0,
            owners: BTreeMap::new(),
            proceeds: NativeAmount::ZERO,
        }
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn mint_price(&self) -> NativeAmount {
        self.mint_price
    }

    /// Total tokens minted so far (also the next id to be assigned).
    pub fn total_minted(&self) -> u64 {
        self.next_id
    }

    /// Native coin collected from mints so far.
    pub fn proceeds(&self) -> NativeAmount {
        self.proceeds
    }

    /// Number of tokens currently owned by `account`.
    pub fn balance_of(&self, account: &AccountAddress) -> u64 {
        self.owners
            .values()
            .filter(|owner| *owner == account)
            .count() as u64
    }

    /// Current owner of `token`.
    pub fn owner_of(&self, token: TokenId) -> Result<&AccountAddress, RegistryError> {
        self.owners
            .get(&token)
            .ok_or(RegistryError::InvalidTokenId(token))
    }

    /// Ids of all tokens currently owned by `account`, in mint order.
    pub fn tokens_owned_by(&self, account: &AccountAddress) -> Vec<TokenId> {
        self.owners
            .iter()
            .filter(|(_, owner)| *owner == account)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Mint the next token to `minter` against `payment`.
    ///
    /// The payment must meet the mint price; the whole payment is kept as
    /// proceeds. The new ownership is reported to the engine so accrual
    /// starts at `now`.
    pub fn mint(
        &mut self,
        engine: &mut YieldEngine,
        minter: &AccountAddress,
        payment: NativeAmount,
        now: Timestamp,
    ) -> Result<TokenId, RegistryError> {
        if payment < self.mint_price {
            return Err(RegistryError::InsufficientPayment {
                required: self.mint_price,
                provided: payment,
            });
        }
        if let Some(max) = self.max_supply {
            if self.next_id >= max {
                return Err(RegistryError::InvalidTokenId(TokenId::new(self.next_id)));
            }
        }

        let token = TokenId::new(self.next_id);
        engine.record_transfer(&self.address, &self.address, token, None, minter, now)?;

        self.owners.insert(token, minter.clone());
        self.next_id += 1;
        self.proceeds = self
            .proceeds
            .checked_add(payment)
            .ok_or_else(|| RegistryError::Other("mint proceeds overflow".into()))?;
        Ok(token)
    }

    /// Transfer `token` from `from` to `to`.
    ///
    /// Only the current owner may move a token (`caller == from == owner`).
    /// The engine settles `from`'s accrual before ownership changes hands.
    pub fn transfer_from(
        &mut self,
        engine: &mut YieldEngine,
        caller: &AccountAddress,
        from: &AccountAddress,
        to: &AccountAddress,
        token: TokenId,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let owner = self
            .owners
            .get(&token)
            .ok_or(RegistryError::InvalidTokenId(token))?;
        if owner != from {
            return Err(RegistryError::NotTokenOwner {
                token,
                account: from.clone(),
            });
        }
        if caller != from {
            return Err(RegistryError::NotTokenOwner {
                token,
                account: caller.clone(),
            });
        }

        engine.record_transfer(&self.address, &self.address, token, Some(from), to, now)?;
        self.owners.insert(token, to.clone());
        Ok(())
    }

    /// Pending reward for `owner` — façade over the engine.
    pub fn pending_rewards_for(
        &self,
        engine: &YieldEngine,
        owner: &AccountAddress,
        now: Timestamp,
    ) -> Result<RewardAmount, RegistryError> {
        Ok(engine.pending_rewards_for(&self.address, owner, now)?)
    }

    /// Claim `owner`'s rewards — façade over the engine.
    pub fn claim_rewards_for(
        &self,
        engine: &mut YieldEngine,
        owner: &AccountAddress,
        caller: &AccountAddress,
        now: Timestamp,
        sink: &mut dyn RewardSink,
    ) -> Result<RewardAmount, RegistryError> {
        Ok(engine.claim_rewards_for(&self.address, owner, caller, now, sink)?)
    }
}

impl Collection {
    /// Persist this collection to a collection store.
    pub fn save_to_store(
        &self,
        store: &dyn hdn_store::CollectionStore,
    ) -> Result<(), RegistryError> {
        let bytes = bincode::serialize(self).map_err(|e| RegistryError::Other(e.to_string()))?;
        store
            .put_collection(&self.address, &bytes)
            .map_err(|e| RegistryError::Other(e.to_string()))?;
        Ok(())
    }

    /// Restore one collection by address from a collection store.
    pub fn load_from_store(
        store: &dyn hdn_store::CollectionStore,
        address: &AccountAddress,
    ) -> Result<Self, RegistryError> {
        match store.get_collection(address) {
            Ok(Some(bytes)) => {
                bincode::deserialize(&bytes).map_err(|e| RegistryError::Other(e.to_string()))
            }
            Ok(None) => Err(RegistryError::Other(format!(
                "collection {address} not found in store"
            ))),
            Err(e) => Err(RegistryError::Other(e.to_string())),
        }
    }
}
