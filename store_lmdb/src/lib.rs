//! LMDB storage backend for the HDN yield protocol.
//!
//! Implements all storage traits from `hdn-store` using the `heed` LMDB
//! bindings. Each logical store maps to a pair of named LMDB databases
//! (state + meta) within a single shared environment.

pub mod accrual;
pub mod balance;
pub mod collection;
pub mod environment;
pub mod error;

pub use accrual::LmdbYieldStore;
pub use balance::LmdbBalanceStore;
pub use collection::LmdbCollectionStore;
pub use environment::LmdbStore;
pub use error::LmdbError;
