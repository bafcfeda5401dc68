use hdn_store::{BalanceStore, StoreError};
use hdn_types::AccountAddress;
use heed::types::Bytes;
use heed::{Database, Env};
use std::str::FromStr;
use std::sync::Arc;

pub struct LmdbBalanceStore {
    env: Arc<Env>,
    balance_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbBalanceStore {
    pub fn new(
        env: Arc<Env>,
        balance_db: Database<Bytes, Bytes>,
        meta_db: Database<Bytes, Bytes>,
    ) -> Self {
        Self {
            env,
            balance_db,
            meta_db,
        }
    }
}

fn decode_raw(bytes: &[u8]) -> Result<u128, StoreError> {
    let arr: [u8; 16] = bytes.try_into().map_err(|_| {
        StoreError::Corruption(format!("balance has {} bytes, expected 16", bytes.len()))
    })?;
    Ok(u128::from_be_bytes(arr))
}

impl BalanceStore for LmdbBalanceStore {
    fn get_balance(&self, account: &AccountAddress) -> Result<Option<u128>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match self.balance_db.get(&txn, account.as_str().as_bytes()) {
            Ok(Some(bytes)) => Ok(Some(decode_raw(bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn put_balance(&self, account: &AccountAddress, raw: u128) -> Result<(), StoreError> {
        let mut txn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.balance_db
            .put(&mut txn, account.as_str().as_bytes(), &raw.to_be_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn iter_balances(&self) -> Result<Vec<(AccountAddress, u128)>, StoreError> {
        let txn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut results = Vec::new();
        let iter = self
            .balance_db
            .iter(&txn)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        for item in iter {
            let (key, val) = item.map_err(|e| StoreError::Backend(e.to_string()))?;
            let addr_str =
                std::str::from_utf8(key).map_err(|e| StoreError::Corruption(e.to_string()))?;
            let address = AccountAddress::from_str(addr_str)
                .map_err(|e| StoreError::Corruption(e.to_string()))?;
            results.push((address, decode_raw(val)?));
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
