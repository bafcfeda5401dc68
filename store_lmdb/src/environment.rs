//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Env, EnvOpenOptions};

use crate::accrual::LmdbYieldStore;
use crate::balance::LmdbBalanceStore;
use crate::collection::LmdbCollectionStore;
use crate::LmdbError;

/// Default LMDB map size: 256 MiB — generous for a balances-and-checkpoints
/// workload.
const DEFAULT_MAP_SIZE: usize = 1 << 28;
/// Number of named LMDB databases.
const MAX_DBS: u32 = 6;

/// One LMDB environment holding every store.
pub struct LmdbStore {
    _env: Arc<Env>,
    pub accrual: LmdbYieldStore,
    pub balances: LmdbBalanceStore,
    pub collections: LmdbCollectionStore,
}

impl LmdbStore {
    /// Open or create an LMDB environment at `path` with all databases.
    pub fn open(path: &Path) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(MAX_DBS)
                .map_size(DEFAULT_MAP_SIZE)
                .open(path)?
        };
        let env = Arc::new(env);

        let mut wtxn = env.write_txn()?;
        let yield_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("yield_state"))?;
        let yield_meta_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("yield_meta"))?;
        let balance_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("balances"))?;
        let balance_meta_db =
            env.create_database::<Bytes, Bytes>(&mut wtxn, Some("balance_meta"))?;
        let collection_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("collections"))?;
        let collection_meta_db =
            env.create_database::<Bytes, Bytes>(&mut wtxn, Some("collection_meta"))?;
        wtxn.commit()?;

        Ok(Self {
            accrual: LmdbYieldStore::new(env.clone(), yield_db, yield_meta_db),
            balances: LmdbBalanceStore::new(env.clone(), balance_db, balance_meta_db),
            collections: LmdbCollectionStore::new(
                env.clone(),
                collection_db,
                collection_meta_db,
            ),
            _env: env,
        })
    }
}
