//! Local account credentials.
//!
//! Accounts live in a JSON credentials file (`accounts.json` by
//! convention): a map from a human name to an
//! `{accountId, privateKey, publicKey}` triple, hex-encoded. New accounts
//! are created locally from an Ed25519 keypair; the address doubles as the
//! account id and is derived from the public key via Blake2b. Nothing here
//! signs anything — key custody beyond this file is out of scope.

pub mod error;
pub mod file;

pub use error::AccountsError;
pub use file::{derive_address, AccountsFile, StoredAccount};
