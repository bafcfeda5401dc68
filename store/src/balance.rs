use crate::StoreError;
use hdn_types::AccountAddress;

/// Store trait for the reward ledger's per-account balances.
///
/// Balances are raw u128 units; the ledger's token metadata and role
/// grants travel through the meta keyspace as opaque blobs.
pub trait BalanceStore {
    fn get_balance(&self, account: &AccountAddress) -> Result<Option<u128>, StoreError>;
    fn put_balance(&self, account: &AccountAddress, raw: u128) -> Result<(), StoreError>;
    fn iter_balances(&self) -> Result<Vec<(AccountAddress, u128)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
