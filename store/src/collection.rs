use crate::StoreError;
use hdn_types::AccountAddress;

/// Store trait for NFT collection registries, keyed by collection address.
///
/// Same opaque-blob convention as [`crate::YieldStore`]: the registry
/// crate owns its serialization format.
pub trait CollectionStore {
    fn get_collection(&self, collection: &AccountAddress) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_collection(&self, collection: &AccountAddress, state: &[u8])
        -> Result<(), StoreError>;
    fn iter_collections(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
