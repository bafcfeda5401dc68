//! End-to-end flow: deploy, wire roles, mint, transfer, claim.
//!
//! Mirrors the launch wiring: the ledger grants treasury to the yield
//! manager, the manager grants the yield role to the collection, and the
//! manager's parameters are installed for the collection.

use hdn_access::Role;
use hdn_ledger::{RewardLedger, TreasuryGate};
use hdn_registry::Collection;
use hdn_rewards::{YieldEngine, YieldError};
use hdn_types::{
    AccountAddress, NativeAmount, RewardAmount, Timestamp, TokenId, YieldParams, HDN_UNIT,
};

fn addr(n: u8) -> AccountAddress {
    AccountAddress::from_bytes(&[n; 20])
}

struct Deployment {
    ledger: RewardLedger,
    engine: YieldEngine,
    collection: Collection,
}

const OWNER: u8 = 1;
const MANAGER: u8 = 2;
const NUT: u8 = 3;
const ALICE: u8 = 10;
const BOB: u8 = 11;

fn deploy(end_time: Timestamp) -> Deployment {
    let owner = addr(OWNER);
    let manager_address = addr(MANAGER);
    let collection_address = addr(NUT);

    let mut ledger = RewardLedger::new(owner.clone());
    let mut engine = YieldEngine::new(owner.clone(), manager_address.clone());
    let collection = Collection::new(
        collection_address.clone(),
        Collection::NAME,
        Collection::SYMBOL,
        NativeAmount::from_whole(500),
        Some(10_000),
    );

    // The yield manager needs the treasury role granted by the ledger.
    ledger
        .grant_role(&owner, Role::Treasury, &manager_address)
        .unwrap();
    // The collection needs the yield role granted by the yield manager.
    engine
        .grant_role(&owner, Role::Yield, &collection_address)
        .unwrap();
    // Install the collection's yield parameters.
    engine
        .set_yield_parameters(
            &owner,
            &collection_address,
            YieldParams::new(10 * HDN_UNIT, end_time),
        )
        .unwrap();

    Deployment {
        ledger,
        engine,
        collection,
    }
}

fn mint(d: &mut Deployment, to: u8, at: Timestamp) -> TokenId {
    d.collection
        .mint(&mut d.engine, &addr(to), NativeAmount::from_whole(500), at)
        .unwrap()
}

fn pending(d: &Deployment, who: u8, at: Timestamp) -> u128 {
    d.collection
        .pending_rewards_for(&d.engine, &addr(who), at)
        .unwrap()
        .whole()
}

fn claim(d: &mut Deployment, who: u8, at: Timestamp) -> Result<RewardAmount, YieldError> {
    let treasurer = d.engine.address().clone();
    let mut gate = TreasuryGate::new(&mut d.ledger, treasurer);
    d.collection
        .claim_rewards_for(&mut d.engine, &addr(who), &addr(who), at, &mut gate)
        .map_err(|e| match e {
            hdn_registry::RegistryError::Yield(y) => y,
            other => panic!("unexpected registry error: {other}"),
        })
}

#[test]
fn deployment_wiring_grants_the_expected_roles() {
    let d = deploy(Timestamp::new(u64::MAX));

    assert!(d.ledger.has_role(&addr(OWNER), Role::Admin));
    assert!(d.engine.has_role(&addr(OWNER), Role::Admin));
    assert!(d.ledger.has_role(&addr(MANAGER), Role::Treasury));
    assert!(d.engine.has_role(&addr(NUT), Role::Yield));
}

#[test]
fn full_scenario_mint_transfer_and_claim() {
    let mut d = deploy(Timestamp::new(u64::MAX));
    let t0 = Timestamp::new(0);

    // Mint token #0 to Alice at t0, hold 5 days, hand to Bob, wait 10 more.
    let token = mint(&mut d, ALICE, t0);
    assert_eq!(token, TokenId::new(0));

    let t5 = t0.plus_days(5);
    d.collection
        .transfer_from(&mut d.engine, &addr(ALICE), &addr(ALICE), &addr(BOB), token, t5)
        .unwrap();

    let t15 = t0.plus_days(15);
    assert_eq!(d.collection.balance_of(&addr(ALICE)), 0);
    assert_eq!(d.collection.balance_of(&addr(BOB)), 1);
    assert_eq!(d.collection.total_minted(), 1);

    assert_eq!(pending(&d, ALICE, t15), 50);
    assert_eq!(pending(&d, BOB, t15), 100);

    // Claims land on the reward ledger exactly.
    claim(&mut d, ALICE, t15).unwrap();
    claim(&mut d, BOB, t15).unwrap();

    assert_eq!(d.ledger.balance_of(&addr(ALICE)), RewardAmount::from_whole(50));
    assert_eq!(d.ledger.balance_of(&addr(BOB)), RewardAmount::from_whole(100));
    assert_eq!(d.ledger.total_supply(), RewardAmount::from_whole(150));
}

#[test]
fn claiming_for_someone_else_is_rejected() {
    let mut d = deploy(Timestamp::new(u64::MAX));
    mint(&mut d, ALICE, Timestamp::new(0));

    let treasurer = d.engine.address().clone();
    let mut gate = TreasuryGate::new(&mut d.ledger, treasurer);
    let err = d
        .collection
        .claim_rewards_for(
            &mut d.engine,
            &addr(ALICE),
            &addr(BOB),
            Timestamp::new(0).plus_days(3),
            &mut gate,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        hdn_registry::RegistryError::Yield(YieldError::Unauthorized { .. })
    ));
}

#[test]
fn no_rewards_accrue_after_the_program_ends() {
    let t0 = Timestamp::new(0);
    let end = t0.plus_days(60);
    let mut d = deploy(end);

    mint(&mut d, ALICE, t0);
    mint(&mut d, BOB, t0);

    // At the end of the program both owners have something to claim.
    assert!(pending(&d, ALICE, end) > 0);
    assert!(pending(&d, BOB, end) > 0);
    claim(&mut d, ALICE, end).unwrap();
    claim(&mut d, BOB, end).unwrap();

    // Fresh tokens minted after the end accrue nothing over 10 dead days.
    mint(&mut d, ALICE, end);
    mint(&mut d, BOB, end);
    let later = end.plus_days(10);
    assert_eq!(pending(&d, ALICE, later), 0);
    assert_eq!(pending(&d, BOB, later), 0);

    assert!(matches!(
        claim(&mut d, ALICE, later),
        Err(YieldError::NothingToClaim)
    ));
    assert!(matches!(
        claim(&mut d, BOB, later),
        Err(YieldError::NothingToClaim)
    ));
}

#[test]
fn revoked_treasury_role_blocks_claims_but_keeps_accrual() {
    let mut d = deploy(Timestamp::new(u64::MAX));
    let t0 = Timestamp::new(0);
    mint(&mut d, ALICE, t0);

    // Sever the treasury link.
    d.ledger
        .roles
        .revoke(&addr(OWNER), Role::Treasury, &addr(MANAGER))
        .unwrap();

    let t7 = t0.plus_days(7);
    assert!(matches!(claim(&mut d, ALICE, t7), Err(YieldError::Sink(_))));

    // Nothing was paid and nothing was lost.
    assert_eq!(d.ledger.balance_of(&addr(ALICE)), RewardAmount::ZERO);
    assert_eq!(pending(&d, ALICE, t7), 70);
}
