//! Round-trips of engine, ledger, and collection state through LMDB.

use hdn_access::Role;
use hdn_ledger::RewardLedger;
use hdn_registry::Collection;
use hdn_rewards::YieldEngine;
use hdn_store::{BalanceStore, YieldStore};
use hdn_store_lmdb::LmdbStore;
use hdn_types::{
    AccountAddress, NativeAmount, RewardAmount, Timestamp, TokenId, YieldParams, HDN_UNIT,
};

fn addr(n: u8) -> AccountAddress {
    AccountAddress::from_bytes(&[n; 20])
}

#[test]
fn balance_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = LmdbStore::open(dir.path()).unwrap();

    assert_eq!(store.balances.get_balance(&addr(1)).unwrap(), None);
    store.balances.put_balance(&addr(1), 42 * HDN_UNIT).unwrap();
    store.balances.put_balance(&addr(2), 7).unwrap();

    assert_eq!(
        store.balances.get_balance(&addr(1)).unwrap(),
        Some(42 * HDN_UNIT)
    );
    let mut all = store.balances.iter_balances().unwrap();
    all.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(all, vec![(addr(1), 42 * HDN_UNIT), (addr(2), 7)]);
}

#[test]
fn meta_keyspace_is_independent_of_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = LmdbStore::open(dir.path()).unwrap();

    store.accrual.put_meta(b"roles", b"blob").unwrap();
    assert_eq!(store.accrual.get_meta(b"roles").unwrap(), Some(b"blob".to_vec()));
    assert_eq!(store.accrual.get_meta(b"missing").unwrap(), None);
    assert!(store.accrual.iter_collection_states().unwrap().is_empty());
}

#[test]
fn engine_survives_a_save_load_cycle() {
    let dir = tempfile::tempdir().unwrap();

    let admin = addr(1);
    let collection = addr(2);
    let alice = addr(10);
    let t0 = Timestamp::new(0);

    let mut engine = YieldEngine::new(admin.clone(), addr(0xEE));
    engine.grant_role(&admin, Role::Yield, &collection).unwrap();
    engine
        .set_yield_parameters(
            &admin,
            &collection,
            YieldParams::new(10 * HDN_UNIT, Timestamp::new(u64::MAX)),
        )
        .unwrap();
    engine
        .record_transfer(&collection, &collection, TokenId::new(0), None, &alice, t0)
        .unwrap();

    {
        let store = LmdbStore::open(dir.path()).unwrap();
        engine.save_to_store(&store.accrual).unwrap();
    }

    // Reopen from disk and check the accrual picks up where it left off.
    let store = LmdbStore::open(dir.path()).unwrap();
    let restored = YieldEngine::load_from_store(&store.accrual).unwrap();

    assert_eq!(restored.address(), engine.address());
    assert!(restored.has_role(&collection, Role::Yield));
    let pending = restored
        .pending_rewards_for(&collection, &alice, t0.plus_days(7))
        .unwrap();
    assert_eq!(pending, RewardAmount::from_whole(70));
}

#[test]
fn ledger_survives_a_save_load_cycle() {
    let dir = tempfile::tempdir().unwrap();

    let admin = addr(1);
    let mut ledger = RewardLedger::new(admin.clone());
    ledger.grant_role(&admin, Role::Treasury, &addr(5)).unwrap();
    ledger
        .mint(&admin, &addr(10), RewardAmount::from_whole(150))
        .unwrap();

    {
        let store = LmdbStore::open(dir.path()).unwrap();
        ledger.save_to_store(&store.balances).unwrap();
    }

    let store = LmdbStore::open(dir.path()).unwrap();
    let restored = RewardLedger::load_from_store(&store.balances).unwrap();

    assert_eq!(restored.symbol(), "HDN");
    assert_eq!(restored.total_supply(), RewardAmount::from_whole(150));
    assert_eq!(restored.balance_of(&addr(10)), RewardAmount::from_whole(150));
    assert!(restored.has_role(&addr(5), Role::Treasury));
}

#[test]
fn collection_survives_a_save_load_cycle() {
    let dir = tempfile::tempdir().unwrap();

    let admin = addr(1);
    let collection_address = addr(2);
    let alice = addr(10);

    let mut engine = YieldEngine::new(admin.clone(), addr(0xEE));
    engine
        .grant_role(&admin, Role::Yield, &collection_address)
        .unwrap();
    engine
        .set_yield_parameters(&admin, &collection_address, YieldParams::default())
        .unwrap();

    let mut collection = Collection::new(
        collection_address.clone(),
        Collection::NAME,
        Collection::SYMBOL,
        NativeAmount::from_whole(500),
        Some(100),
    );
    collection
        .mint(&mut engine, &alice, NativeAmount::from_whole(500), Timestamp::new(0))
        .unwrap();

    {
        let store = LmdbStore::open(dir.path()).unwrap();
        collection.save_to_store(&store.collections).unwrap();
    }

    let store = LmdbStore::open(dir.path()).unwrap();
    let restored = Collection::load_from_store(&store.collections, &collection_address).unwrap();

    assert_eq!(restored.total_minted(), 1);
    assert_eq!(restored.balance_of(&alice), 1);
    assert_eq!(restored.owner_of(TokenId::new(0)).unwrap(), &alice);
    assert_eq!(restored.proceeds(), NativeAmount::from_whole(500));
}
