use hdn_store::{StoreError, YieldStore};
use hdn_types::AccountAddress;
use heed::types::Bytes;
use heed::{Database, Env};
use std::str::FromStr;
use std::sync::Arc;

pub struct LmdbYieldStore {
    env: Arc<Env>,
    state_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbYieldStore {
    pub fn new(
        env: Arc<Env>,
        state_db: Database<Bytes, Bytes>,
        meta_db: Database<Bytes, Bytes>,
    ) -> Self {
        Self {
            env,
            state_db,
            meta_db,
        }
    }
}

impl YieldStore for LmdbYieldStore {
    fn get_collection_state(
        &self,
        collection: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match self.state_db.get(&txn, collection.as_str().as_bytes()) {
            Ok(Some(bytes)) => Ok(Some(bytes.to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn put_collection_state(
        &self,
        collection: &AccountAddress,
        state: &[u8],
    ) -> Result<(), StoreError> {
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.state_db
            .put(&mut txn, collection.as_str().as_bytes(), state)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn delete_collection_state(&self, collection: &AccountAddress) -> Result<(), StoreError> {
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.state_db
            .delete(&mut txn, collection.as_str().as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn iter_collection_states(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut results = Vec::new();
        let iter = self
            .state_db
            .iter(&txn)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        for item in iter {
            let (key, val) = item.map_err(|e| StoreError::Backend(e.to_string()))?;
            let addr_str =
                std::str::from_utf8(key).map_err(|e| StoreError::Corruption(e.to_string()))?;
            let address = AccountAddress::from_str(addr_str)
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            results.push((address, val.to_vec()));
        }
        Ok(results)
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match self.meta_db.get(&txn, key) {
            Ok(Some(bytes)) => Ok(Some(bytes.to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.meta_db
            .put(&mut txn, key, value)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
