//! Command implementations.
//!
//! Each mutating command loads the affected state from LMDB, applies one
//! engine/ledger/registry operation, and writes the result back — a single
//! writer per invocation, so operations land atomically and in order.

use anyhow::{bail, Context};
use hdn_access::Role;
use hdn_accounts::{derive_address, AccountsFile};
use hdn_ledger::{RewardLedger, TreasuryGate};
use hdn_registry::Collection;
use hdn_rewards::YieldEngine;
use hdn_store_lmdb::LmdbStore;
use hdn_types::{
    AccountAddress, NativeAmount, Timestamp, TokenId, YieldParams, HDN_UNIT,
};
use hdn_utils::format_duration;

use crate::config::DaemonConfig;

/// Well-known identity seeds for the protocol components.
const LEDGER_IDENTITY: &[u8] = b"hdn:reward-ledger";
const MANAGER_IDENTITY: &[u8] = b"hdn:yield-manager";
const COLLECTION_IDENTITY: &[u8] = b"hdn:astronut";

/// The operator account name; created at init and used as the caller for
/// administrative operations.
const OPERATOR: &str = "operator";

pub struct App {
    config: DaemonConfig,
    store: LmdbStore,
    accounts: AccountsFile,
}

impl App {
    pub fn open(config: DaemonConfig) -> anyhow::Result<Self> {
        let store = LmdbStore::open(&config.data_dir)
            .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
        let accounts = AccountsFile::load_or_default(&config.accounts_file)
            .with_context(|| format!("loading {}", config.accounts_file.display()))?;
        Ok(Self {
            config,
            store,
            accounts,
        })
    }

    fn collection_address() -> AccountAddress {
        derive_address(COLLECTION_IDENTITY)
    }

    fn operator(&self) -> anyhow::Result<AccountAddress> {
        let account = self
            .accounts
            .get(OPERATOR)
            .context("no operator account — run `init` first")?;
        Ok(account.address()?)
    }

    fn resolve(&self, who: &str) -> anyhow::Result<AccountAddress> {
        Ok(self.accounts.resolve(who)?)
    }

    fn load_engine(&self) -> anyhow::Result<YieldEngine> {
        YieldEngine::load_from_store(&self.store.accrual)
            .context("loading yield engine — run `init` first")
    }

    fn load_ledger(&self) -> anyhow::Result<RewardLedger> {
        RewardLedger::load_from_store(&self.store.balances)
            .context("loading reward ledger — run `init` first")
    }

    fn load_collection(&self) -> anyhow::Result<Collection> {
        Collection::load_from_store(&self.store.collections, &Self::collection_address())
            .context("loading collection — run `init` first")
    }

    /// Deploy the ledger, the yield manager, and the collection, and wire
    /// the role graph between them.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if YieldEngine::load_from_store(&self.store.accrual).is_ok() {
            bail!(
                "{} is already initialized",
                self.config.data_dir.display()
            );
        }

        if self.accounts.get(OPERATOR).is_none() {
            self.accounts.create_account(OPERATOR)?;
            self.accounts.save(&self.config.accounts_file)?;
            tracing::info!(
                "created operator account in {}",
                self.config.accounts_file.display()
            );
        }
        let operator = self.operator()?;

        let ledger_address = derive_address(LEDGER_IDENTITY);
        let manager_address = derive_address(MANAGER_IDENTITY);
        let collection_address = Self::collection_address();

        let mut ledger = RewardLedger::new(operator.clone());
        let mut engine = YieldEngine::new(operator.clone(), manager_address.clone());
        let collection = Collection::new(
            collection_address.clone(),
            Collection::NAME,
            Collection::SYMBOL,
            NativeAmount::from_whole(self.config.mint_price),
            self.config.max_supply,
        );

        // The yield manager needs the treasury role granted by the ledger.
        ledger.grant_role(&operator, Role::Treasury, &manager_address)?;
        // The collection needs the yield role granted by the yield manager.
        engine.grant_role(&operator, Role::Yield, &collection_address)?;
        // Install the collection's yield parameters.
        let params = YieldParams::new(
            self.config.yield_rate_per_day as u128 * HDN_UNIT,
            Timestamp::new(self.config.yield_end_time),
        );
        engine.set_yield_parameters(&operator, &collection_address, params)?;

        ledger.save_to_store(&self.store.balances)?;
        engine.save_to_store(&self.store.accrual)?;
        collection.save_to_store(&self.store.collections)?;

        tracing::info!(network = self.config.network.as_str(), "initialized");
        tracing::info!("ledger    {} ({})", ledger_address, ledger.symbol());
        tracing::info!("manager   {}", manager_address);
        tracing::info!("collection {} ({})", collection_address, collection.symbol());
        println!("initialized {} network at {}", self.config.network.as_str(), self.config.data_dir.display());
        Ok(())
    }

    pub fn account_new(&mut self, name: &str) -> anyhow::Result<()> {
        let account = self.accounts.create_account(name)?.clone();
        self.accounts.save(&self.config.accounts_file)?;
        tracing::info!(name, address = %account.account_id, "created account");
        println!("{name}: {}", account.account_id);
        Ok(())
    }

    pub fn account_list(&self) -> anyhow::Result<()> {
        if self.accounts.is_empty() {
            println!("no accounts — run `init` or `account new <name>`");
            return Ok(());
        }
        for name in self.accounts.names() {
            let account = self.accounts.get(name).expect("listed name");
            println!("{name}: {}", account.account_id);
        }
        Ok(())
    }

    pub fn mint(&self, minter: &str, payment: Option<u64>, at: Timestamp) -> anyhow::Result<()> {
        let minter_address = self.resolve(minter)?;
        let mut engine = self.load_engine()?;
        let mut collection = self.load_collection()?;

        let payment = payment
            .map(NativeAmount::from_whole)
            .unwrap_or_else(|| collection.mint_price());
        let token = collection.mint(&mut engine, &minter_address, payment, at)?;

        engine.save_to_store(&self.store.accrual)?;
        collection.save_to_store(&self.store.collections)?;

        tracing::info!(%token, minter = %minter_address, "minted");
        println!("minted token {token} to {minter_address}");
        Ok(())
    }

    pub fn transfer(&self, from: &str, to: &str, token: u64, at: Timestamp) -> anyhow::Result<()> {
        let from_address = self.resolve(from)?;
        let to_address = self.resolve(to)?;
        let token = TokenId::new(token);

        let mut engine = self.load_engine()?;
        let mut collection = self.load_collection()?;

        collection.transfer_from(&mut engine, &from_address, &from_address, &to_address, token, at)?;

        engine.save_to_store(&self.store.accrual)?;
        collection.save_to_store(&self.store.collections)?;

        tracing::info!(%token, from = %from_address, to = %to_address, "transferred");
        println!("transferred token {token} from {from_address} to {to_address}");
        Ok(())
    }

    pub fn pending(&self, owner: &str, at: Timestamp) -> anyhow::Result<()> {
        let owner_address = self.resolve(owner)?;
        let engine = self.load_engine()?;
        let collection = self.load_collection()?;

        let pending = collection.pending_rewards_for(&engine, &owner_address, at)?;
        let held = collection.balance_of(&owner_address);
        println!(
            "{owner_address}: {} HDN pending ({} raw) across {held} token(s)",
            pending.whole(),
            pending.raw()
        );
        Ok(())
    }

    pub fn claim(&self, owner: &str, at: Timestamp) -> anyhow::Result<()> {
        let owner_address = self.resolve(owner)?;
        let mut engine = self.load_engine()?;
        let mut ledger = self.load_ledger()?;
        let collection = self.load_collection()?;

        let treasurer = engine.address().clone();
        let paid = {
            let mut gate = TreasuryGate::new(&mut ledger, treasurer);
            collection.claim_rewards_for(&mut engine, &owner_address, &owner_address, at, &mut gate)?
        };

        engine.save_to_store(&self.store.accrual)?;
        ledger.save_to_store(&self.store.balances)?;

        tracing::info!(owner = %owner_address, amount = %paid, "claimed");
        println!("claimed {} HDN ({} raw) for {owner_address}", paid.whole(), paid.raw());
        Ok(())
    }

    pub fn balance(&self, account: &str) -> anyhow::Result<()> {
        let address = self.resolve(account)?;
        let ledger = self.load_ledger()?;
        let balance = ledger.balance_of(&address);
        println!("{address}: {} HDN ({} raw)", balance.whole(), balance.raw());
        Ok(())
    }

    pub fn status(&self, at: Timestamp) -> anyhow::Result<()> {
        let engine = self.load_engine()?;
        let ledger = self.load_ledger()?;
        let collection = self.load_collection()?;

        println!(
            "{} ({}) — supply {} / cap {} HDN",
            ledger.name(),
            ledger.symbol(),
            ledger.total_supply().whole(),
            ledger.cap().whole()
        );
        println!(
            "{} ({}) — {} minted, price {} raw",
            collection.name(),
            collection.symbol(),
            collection.total_minted(),
            collection.mint_price()
        );
        let book = engine
            .collections
            .get(collection.address())
            .context("collection has no yield configuration")?;
        let remaining = at.elapsed_since(book.params.end_time);
        if remaining > 0 {
            println!(
                "yield: {} HDN/token/day, ends in {}",
                book.params.rate_per_day / HDN_UNIT,
                format_duration(remaining)
            );
        } else {
            println!(
                "yield: {} HDN/token/day, program ended",
                book.params.rate_per_day / HDN_UNIT
            );
        }
        Ok(())
    }

    pub fn set_yield(&self, rate_per_day: u64, end_time: u64) -> anyhow::Result<()> {
        let operator = self.operator()?;
        let mut engine = self.load_engine()?;

        let params = YieldParams::new(rate_per_day as u128 * HDN_UNIT, Timestamp::new(end_time));
        engine.set_yield_parameters(&operator, &Self::collection_address(), params)?;
        engine.save_to_store(&self.store.accrual)?;

        tracing::info!(rate_per_day, end_time, "yield parameters updated");
        println!("yield set to {rate_per_day} HDN/token/day until {end_time}");
        Ok(())
    }

    pub fn grant_role(&self, on: RoleTarget, role: Role, to: &str) -> anyhow::Result<()> {
        let operator = self.operator()?;
        let to_address = self.resolve(to)?;

        match on {
            RoleTarget::Ledger => {
                let mut ledger = self.load_ledger()?;
                ledger.grant_role(&operator, role, &to_address)?;
                ledger.save_to_store(&self.store.balances)?;
            }
            RoleTarget::Manager => {
                let mut engine = self.load_engine()?;
                engine.grant_role(&operator, role, &to_address)?;
                engine.save_to_store(&self.store.accrual)?;
            }
        }
        tracing::info!(%role, to = %to_address, ?on, "granted role");
        println!("granted {role} on {on:?} to {to_address}");
        Ok(())
    }
}

/// Which component's role registry a grant applies to.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum RoleTarget {
    Ledger,
    Manager,
}
