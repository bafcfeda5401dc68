use crate::StoreError;
use hdn_types::AccountAddress;

/// Store trait for persisting yield-engine state to durable storage.
///
/// Uses opaque `Vec<u8>` so the store doesn't depend on the `hdn-rewards`
/// crate (which would create a circular dependency). The engine
/// serializes/deserializes its own per-collection accrual books.
pub trait YieldStore {
    fn get_collection_state(
        &self,
        collection: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_collection_state(
        &self,
        collection: &AccountAddress,
        state: &[u8],
    ) -> Result<(), StoreError>;
    fn delete_collection_state(&self, collection: &AccountAddress) -> Result<(), StoreError>;
    fn iter_collection_states(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
