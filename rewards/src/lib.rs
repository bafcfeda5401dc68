//! The yield engine — deterministic reward accrual tied to NFT ownership.
//!
//! Rewards are a function of time, not stored balances:
//! `pending(owner) = settled(owner) + Σ rate × (min(t_now, t_end) − checkpoint(token))`
//! over the tokens the owner currently holds.
//!
//! This crate handles:
//! - Pending-reward computation from checkpoints and yield parameters
//! - Settlement on every ownership change (mint and transfer)
//! - Claims, paid out through an injected [`RewardSink`]
//! - Per-collection yield parameter administration

pub mod engine;
pub mod error;
pub mod sink;
pub mod state;

pub use engine::YieldEngine;
pub use error::YieldError;
pub use sink::{RewardSink, SinkError};
pub use state::{CollectionYield, TokenRecord};
