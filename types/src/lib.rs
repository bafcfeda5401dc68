//! Fundamental types for the HDN yield protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account addresses, token ids, fixed-point amounts, timestamps,
//! and the per-collection yield parameters.

pub mod address;
pub mod amount;
pub mod network;
pub mod params;
pub mod time;
pub mod token;

pub use address::AccountAddress;
pub use amount::{NativeAmount, RewardAmount, HDN_UNIT};
pub use network::NetworkId;
pub use params::YieldParams;
pub use time::{Timestamp, SECS_PER_DAY};
pub use token::TokenId;
