//! The credentials file and account creation.

use crate::error::AccountsError;
use blake2::{Blake2b512, Digest};
use ed25519_dalek::SigningKey;
use hdn_types::AccountAddress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// One stored credential triple, hex-encoded.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    /// The account's address (same derivation as [`derive_address`]).
    pub account_id: String,
    /// Ed25519 secret key, 32 bytes hex.
    pub private_key: String,
    /// Ed25519 public key, 32 bytes hex.
    pub public_key: String,
}

impl StoredAccount {
    /// The account's on-ledger address.
    pub fn address(&self) -> Result<AccountAddress, AccountsError> {
        AccountAddress::from_str(&self.account_id)
            .map_err(|e| AccountsError::Parse(e.to_string()))
    }
}

/// Derive an account address from arbitrary identity bytes: the first 20
/// bytes of a Blake2b digest. Used for public keys and for well-known
/// component identities (ledger, yield manager, collection).
pub fn derive_address(identity: &[u8]) -> AccountAddress {
    let digest = Blake2b512::digest(identity);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[..20]);
    AccountAddress::from_bytes(&bytes)
}

/// The credentials file: named accounts, sorted for stable output.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccountsFile {
    #[serde(flatten)]
    accounts: BTreeMap<String, StoredAccount>,
}

impl AccountsFile {
    /// Load the credentials file at `path`.
    pub fn load(path: &Path) -> Result<Self, AccountsError> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| AccountsError::Parse(e.to_string()))
    }

    /// Load the credentials file, or start empty if it doesn't exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self, AccountsError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the credentials file to `path` (pretty-printed, stable order).
    pub fn save(&self, path: &Path) -> Result<(), AccountsError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|e| AccountsError::Parse(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&StoredAccount> {
        self.accounts.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Resolve `who` to an address: an account name from this file, or a
    /// literal `0x…` address.
    pub fn resolve(&self, who: &str) -> Result<AccountAddress, AccountsError> {
        if let Some(account) = self.accounts.get(who) {
            return account.address();
        }
        AccountAddress::from_str(who)
            .map_err(|_| AccountsError::UnknownAccount(who.to_string()))
    }

    /// Create a fresh Ed25519 account under `name` and return it.
    ///
    /// The caller is responsible for persisting the file afterwards.
    pub fn create_account(&mut self, name: &str) -> Result<&StoredAccount, AccountsError> {
        if self.accounts.contains_key(name) {
            return Err(AccountsError::AccountExists(name.to_string()));
        }

        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed).map_err(|e| AccountsError::Key(e.to_string()))?;
        let signing_key = SigningKey::from_bytes(&seed);
        let verifying_key = signing_key.verifying_key();

        let address = derive_address(verifying_key.as_bytes());
        let account = StoredAccount {
            account_id: address.as_str().to_string(),
            private_key: hex::encode(signing_key.to_bytes()),
            public_key: hex::encode(verifying_key.as_bytes()),
        };
        self.accounts.insert(name.to_string(), account);
        Ok(self.accounts.get(name).expect("just inserted"))
    }
}
