//! The HDN reward ledger.
//!
//! A capped fungible balance store: accounts start at zero and balances
//! only grow through role-gated minting (treasury or minter) or shrink and
//! grow through transfers. The yield manager holds the treasury role so
//! claimed rewards can be paid out; that link is expressed as an explicit
//! [`TreasuryGate`] capability created at wiring time.

pub mod error;
pub mod ledger;
pub mod treasury;

pub use error::LedgerError;
pub use ledger::RewardLedger;
pub use treasury::TreasuryGate;
