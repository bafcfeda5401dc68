//! The fungible reward ledger.

use crate::error::LedgerError;
use hdn_access::{AccessError, Role, RoleRegistry};
use hdn_types::{AccountAddress, RewardAmount, HDN_UNIT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token metadata persisted alongside balances.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TokenInfo {
    name: String,
    symbol: String,
    decimals: u8,
    cap: u128,
    total_supply: u128,
}

/// The HDN reward ledger: per-account balances under a hard supply cap.
///
/// Minting requires the treasury or minter role in the ledger's own
/// registry; the deployer receives admin and treasury at construction and
/// grants treasury to the yield manager during wiring.
pub struct RewardLedger {
    info: TokenInfo,
    balances: HashMap<AccountAddress, u128>,
    pub roles: RoleRegistry,
}

impl RewardLedger {
    pub const NAME: &'static str = "HodlDeezNuts";
    pub const SYMBOL: &'static str = "HDN";
    pub const DECIMALS: u8 = 18;
    /// Hard supply cap: 50 billion whole tokens.
    pub const CAP: u128 = 50_000_000_000 * HDN_UNIT;

    /// Create the HDN ledger with `admin` as administrator and treasurer.
    pub fn new(admin: AccountAddress) -> Self {
        Self {
            info: TokenInfo {
                name: Self::NAME.to_string(),
                symbol: Self::SYMBOL.to_string(),
                decimals: Self::DECIMALS,
                cap: Self::CAP,
                total_supply: 0,
            },
            balances: HashMap::new(),
            roles: RoleRegistry::with_admin_and(admin, &[Role::Treasury]),
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn symbol(&self) -> &str {
        &self.info.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.info.decimals
    }

    pub fn cap(&self) -> RewardAmount {
        RewardAmount::new(self.info.cap)
    }

    pub fn total_supply(&self) -> RewardAmount {
        RewardAmount::new(self.info.total_supply)
    }

    pub fn balance_of(&self, account: &AccountAddress) -> RewardAmount {
        RewardAmount::new(self.balances.get(account).copied().unwrap_or(0))
    }

    /// Mint new HDN to `to`. `caller` must hold the treasury or minter role.
    pub fn mint(
        &mut self,
        caller: &AccountAddress,
        to: &AccountAddress,
        amount: RewardAmount,
    ) -> Result<(), LedgerError> {
        if !self.roles.has_role(caller, Role::Treasury) && !self.roles.has_role(caller, Role::Minter)
        {
            return Err(LedgerError::Access(AccessError::MissingRole {
                account: caller.clone(),
                required: Role::Treasury,
            }));
        }
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        let new_supply = self
            .info
            .total_supply
            .checked_add(amount.raw())
            .ok_or(LedgerError::Overflow)?;
        if new_supply > self.info.cap {
            return Err(LedgerError::CapExceeded {
                cap: self.info.cap,
                requested: new_supply,
            });
        }
        let balance = self.balances.entry(to.clone()).or_insert(0);
        *balance = balance.checked_add(amount.raw()).ok_or(LedgerError::Overflow)?;
        self.info.total_supply = new_supply;
        Ok(())
    }

    /// Move HDN from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: RewardAmount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        let available = self.balances.get(from).copied().unwrap_or(0);
        if available < amount.raw() {
            return Err(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available,
            });
        }
        self.balances.insert(from.clone(), available - amount.raw());
        let to_balance = self.balances.entry(to.clone()).or_insert(0);
        *to_balance = to_balance
            .checked_add(amount.raw())
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Grant a role in the ledger's registry. `caller` must be an admin.
    pub fn grant_role(
        &mut self,
        caller: &AccountAddress,
        role: Role,
        to: &AccountAddress,
    ) -> Result<(), LedgerError> {
        self.roles.grant(caller, role, to)?;
        Ok(())
    }

    pub fn has_role(&self, account: &AccountAddress, role: Role) -> bool {
        self.roles.has_role(account, role)
    }
}

impl RewardLedger {
    const META_TOKEN_INFO: &'static [u8] = b"token_info";
    const META_ROLES: &'static [u8] = b"roles";

    /// Persist all ledger state to a balance store.
    pub fn save_to_store(&self, store: &dyn hdn_store::BalanceStore) -> Result<(), LedgerError> {
        let info_bytes =
            bincode::serialize(&self.info).map_err(|e| LedgerError::Other(e.to_string()))?;
        store
            .put_meta(Self::META_TOKEN_INFO, &info_bytes)
            .map_err(|e| LedgerError::Other(e.to_string()))?;

        let role_bytes =
            bincode::serialize(&self.roles).map_err(|e| LedgerError::Other(e.to_string()))?;
        store
            .put_meta(Self::META_ROLES, &role_bytes)
            .map_err(|e| LedgerError::Other(e.to_string()))?;

        for (account, raw) in &self.balances {
            store
                .put_balance(account, *raw)
                .map_err(|e| LedgerError::Other(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore ledger state from a balance store.
    pub fn load_from_store(store: &dyn hdn_store::BalanceStore) -> Result<Self, LedgerError> {
        let info: TokenInfo = match store.get_meta(Self::META_TOKEN_INFO) {
            Ok(Some(bytes)) => {
                bincode::deserialize(&bytes).map_err(|e| LedgerError::Other(e.to_string()))?
            }
            Ok(None) => return Err(LedgerError::Other("ledger state not initialized".into())),
            Err(e) => return Err(LedgerError::Other(e.to_string())),
        };

        let roles: RoleRegistry = match store.get_meta(Self::META_ROLES) {
            Ok(Some(bytes)) => {
                bincode::deserialize(&bytes).map_err(|e| LedgerError::Other(e.to_string()))?
            }
            Ok(None) => return Err(LedgerError::Other("ledger roles not initialized".into())),
            Err(e) => return Err(LedgerError::Other(e.to_string())),
        };

        let entries = store
            .iter_balances()
            .map_err(|e| LedgerError::Other(e.to_string()))?;
        let mut balances = HashMap::new();
        for (account, raw) in entries {
            balances.insert(account, raw);
        }
        Ok(Self {
            info,
            balances,
            roles,
        })
    }
}
