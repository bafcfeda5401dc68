//! Core yield engine.

use crate::error::YieldError;
use crate::sink::RewardSink;
use crate::state::{CollectionYield, TokenRecord};
use hdn_access::{Role, RoleRegistry};
use hdn_types::{AccountAddress, RewardAmount, Timestamp, TokenId, YieldParams};
use std::collections::HashMap;

/// The yield engine — accrues, settles, and pays out NFT ownership rewards.
///
/// One engine serves any number of collections, each under its own
/// [`YieldParams`]. Collections report every ownership change through
/// [`YieldEngine::record_transfer`], which requires the caller (the
/// collection's own address) to hold [`Role::Yield`] here. Claims are paid
/// out through a [`RewardSink`]; the engine's `address` is the identity
/// that must hold the ledger's treasury role for those credits to land.
pub struct YieldEngine {
    address: AccountAddress,
    /// Role grants for this engine (admin, per-collection yield role).
    pub roles: RoleRegistry,
    /// Accrual books, keyed by collection address.
    pub collections: HashMap<AccountAddress, CollectionYield>,
}

impl YieldEngine {
    /// Create an engine with `admin` as role administrator and `address`
    /// as the engine's own on-ledger identity.
    pub fn new(admin: AccountAddress, address: AccountAddress) -> Self {
        Self {
            address,
            roles: RoleRegistry::with_admin(admin),
            collections: HashMap::new(),
        }
    }

    /// The engine's own on-ledger identity (the claiming treasurer).
    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    /// Install or replace a collection's yield parameters.
    ///
    /// Admin-only. Already-settled rewards are never rewritten; only
    /// accrual from each token's current checkpoint onward is affected.
    pub fn set_yield_parameters(
        &mut self,
        caller: &AccountAddress,
        collection: &AccountAddress,
        params: YieldParams,
    ) -> Result<(), YieldError> {
        self.roles.require(caller, Role::Admin)?;
        self.collections
            .entry(collection.clone())
            .and_modify(|book| book.params = params)
            .or_insert_with(|| CollectionYield::new(params));
        Ok(())
    }

    /// Grant a role in this engine's registry. Admin-only.
    pub fn grant_role(
        &mut self,
        caller: &AccountAddress,
        role: Role,
        to: &AccountAddress,
    ) -> Result<(), YieldError> {
        self.roles.grant(caller, role, to)?;
        Ok(())
    }

    pub fn has_role(&self, account: &AccountAddress, role: Role) -> bool {
        self.roles.has_role(account, role)
    }

    /// Everything a claim by `owner` would pay out right now: settled
    /// balance plus live accrual over currently-held tokens.
    pub fn pending_rewards_for(
        &self,
        collection: &AccountAddress,
        owner: &AccountAddress,
        now: Timestamp,
    ) -> Result<RewardAmount, YieldError> {
        let book = self
            .collections
            .get(collection)
            .ok_or_else(|| YieldError::UnknownCollection(collection.clone()))?;
        let total = book
            .pending_checked(owner, now)
            .ok_or(YieldError::Overflow)?;
        Ok(RewardAmount::new(total))
    }

    /// Record an ownership change, settling the interval accrued so far.
    ///
    /// Must be invoked for *every* ownership change: a mint passes
    /// `from = None`. For a transfer, the reward accrued since the token's
    /// checkpoint (clamped to the program end) moves into the outgoing
    /// owner's settled balance, then the checkpoint resets to `now` for
    /// the recipient — the settled interval can never be counted again.
    ///
    /// `caller` must hold [`Role::Yield`]; collections are granted it at
    /// wiring time.
    pub fn record_transfer(
        &mut self,
        caller: &AccountAddress,
        collection: &AccountAddress,
        token: TokenId,
        from: Option<&AccountAddress>,
        to: &AccountAddress,
        now: Timestamp,
    ) -> Result<(), YieldError> {
        self.roles.require(caller, Role::Yield)?;
        let book = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| YieldError::UnknownCollection(collection.clone()))?;

        match from {
            None => {
                if book.tokens.contains_key(&token) {
                    return Err(YieldError::TokenAlreadyTracked(token));
                }
                book.tokens.insert(
                    token,
                    TokenRecord {
                        owner: to.clone(),
                        checkpoint: now,
                    },
                );
            }
            Some(prev) => {
                let record = book
                    .tokens
                    .get_mut(&token)
                    .ok_or(YieldError::UnknownToken(token))?;
                if record.owner != *prev {
                    return Err(YieldError::OwnerMismatch {
                        token,
                        claimed: prev.clone(),
                    });
                }
                let accrued = book
                    .params
                    .accrual_between(record.checkpoint, now)
                    .ok_or(YieldError::Overflow)?;
                if accrued > 0 {
                    let settled = book.settled.entry(prev.clone()).or_insert(0);
                    *settled = settled.checked_add(accrued).ok_or(YieldError::Overflow)?;
                }
                record.checkpoint = now;
                record.owner = to.clone();
            }
        }
        Ok(())
    }

    /// Pay out `owner`'s full pending reward through `sink`.
    ///
    /// Only the owner may claim for themselves. The credit lands first; on
    /// success the settled balance is zeroed and every held token's
    /// checkpoint resets to `min(now, end_time)`, so a refused credit
    /// leaves accrual state untouched.
    pub fn claim_rewards_for(
        &mut self,
        collection: &AccountAddress,
        owner: &AccountAddress,
        caller: &AccountAddress,
        now: Timestamp,
        sink: &mut dyn RewardSink,
    ) -> Result<RewardAmount, YieldError> {
        if caller != owner {
            return Err(YieldError::Unauthorized {
                caller: caller.clone(),
                owner: owner.clone(),
            });
        }
        let book = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| YieldError::UnknownCollection(collection.clone()))?;

        let total = book
            .pending_checked(owner, now)
            .ok_or(YieldError::Overflow)?;
        if total == 0 {
            return Err(YieldError::NothingToClaim);
        }

        let amount = RewardAmount::new(total);
        sink.credit(owner, amount)?;

        book.settled.remove(owner);
        let until = book.params.effective_until(now);
        for record in book.tokens.values_mut() {
            if record.owner == *owner {
                record.checkpoint = until;
            }
        }
        Ok(amount)
    }
}

impl YieldEngine {
    const META_ROLES: &'static [u8] = b"roles";
    const META_ADDRESS: &'static [u8] = b"address";

    /// Persist all engine state to a yield store.
    pub fn save_to_store(&self, store: &dyn hdn_store::YieldStore) -> Result<(), YieldError> {
        let address_bytes =
            bincode::serialize(&self.address).map_err(|e| YieldError::Other(e.to_string()))?;
        store
            .put_meta(Self::META_ADDRESS, &address_bytes)
            .map_err(|e| YieldError::Other(e.to_string()))?;

        let role_bytes =
            bincode::serialize(&self.roles).map_err(|e| YieldError::Other(e.to_string()))?;
        store
            .put_meta(Self::META_ROLES, &role_bytes)
            .map_err(|e| YieldError::Other(e.to_string()))?;

        for (collection, book) in &self.collections {
            let bytes =
                bincode::serialize(book).map_err(|e| YieldError::Other(e.to_string()))?;
            store
                .put_collection_state(collection, &bytes)
                .map_err(|e| YieldError::Other(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore engine state from a yield store.
    pub fn load_from_store(store: &dyn hdn_store::YieldStore) -> Result<Self, YieldError> {
        let address: AccountAddress = match store.get_meta(Self::META_ADDRESS) {
            Ok(Some(bytes)) => {
                bincode::deserialize(&bytes).map_err(|e| YieldError::Other(e.to_string()))?
            }
            Ok(None) => return Err(YieldError::Other("engine state not initialized".into())),
            Err(e) => return Err(YieldError::Other(e.to_string())),
        };

        let roles: RoleRegistry = match store.get_meta(Self::META_ROLES) {
            Ok(Some(bytes)) => {
                bincode::deserialize(&bytes).map_err(|e| YieldError::Other(e.to_string()))?
            }
            Ok(None) => return Err(YieldError::Other("engine roles not initialized".into())),
            Err(e) => return Err(YieldError::Other(e.to_string())),
        };

        let entries = store
            .iter_collection_states()
            .map_err(|e| YieldError::Other(e.to_string()))?;
        let mut collections = HashMap::new();
        for (collection, bytes) in entries {
            let book: CollectionYield =
                bincode::deserialize(&bytes).map_err(|e| YieldError::Other(e.to_string()))?;
            collections.insert(collection, book);
        }
        Ok(Self {
            address,
            roles,
            collections,
        })
    }
}
