//! Account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An account address: `0x` followed by 40 lowercase hex characters.
///
/// Covers both externally owned accounts (derived from a public key) and
/// protocol components such as the reward ledger, the yield manager, and
/// NFT collections — every participant in the role graph is addressed the
/// same way.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress(String);

/// Error returned when parsing a malformed address.
#[derive(Debug, Error)]
#[error("invalid account address: {0}")]
pub struct AddressParseError(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex characters following the prefix.
    pub const HEX_LEN: usize = 40;

    /// Create a new account address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address. Use [`FromStr`]
    /// for fallible parsing of untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(is_well_formed(&s), "malformed account address: {s}");
        Self(s)
    }

    /// Build an address from exactly 20 raw bytes.
    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        let mut s = String::with_capacity(Self::PREFIX.len() + Self::HEX_LEN);
        s.push_str(Self::PREFIX);
        for b in bytes {
            s.push_str(&format!("{b:02x}"));
        }
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        is_well_formed(&self.0)
    }
}

fn is_well_formed(s: &str) -> bool {
    s.len() == AccountAddress::PREFIX.len() + AccountAddress::HEX_LEN
        && s.starts_with(AccountAddress::PREFIX)
        && s[AccountAddress::PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

impl FromStr for AccountAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        if is_well_formed(&lowered) {
            Ok(Self(lowered))
        } else {
            Err(AddressParseError(s.to_string()))
        }
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
