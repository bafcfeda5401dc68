//! Reward-ledger errors.

use hdn_access::AccessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient HDN: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("supply cap exceeded: cap {cap}, requested total {requested}")]
    CapExceeded { cap: u128, requested: u128 },

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("arithmetic overflow in balance computation")]
    Overflow,

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("{0}")]
    Other(String),
}
