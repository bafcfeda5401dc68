//! Role and permission-set types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of roles used across the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May grant and revoke roles and replace yield parameters.
    /// Granted to the deployer at construction.
    Admin,
    /// May mint reward tokens on the ledger.
    Minter,
    /// May mint reward tokens on the ledger; held by the yield manager so
    /// claims can be paid out.
    Treasury,
    /// May report ownership changes to the yield manager; held by each
    /// NFT collection the manager accrues for.
    Yield,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Minter => "minter",
            Self::Treasury => "treasury",
            Self::Yield => "yield",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Self::Admin => 1 << 0,
            Self::Minter => 1 << 1,
            Self::Treasury => 1 << 2,
            Self::Yield => 1 << 3,
        }
    }

    /// All roles, in display order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Minter, Role::Treasury, Role::Yield];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "minter" => Ok(Self::Minter),
            "treasury" => Ok(Self::Treasury),
            "yield" => Ok(Self::Yield),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The set of roles held by one account, packed into a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: Self = Self(0);

    pub fn single(role: Role) -> Self {
        Self(role.bit())
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn remove(&mut self, role: Role) {
        self.0 &= !role.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Roles present in this set, in display order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in self.iter() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{role}")?;
            first = false;
        }
        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}
