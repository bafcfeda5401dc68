//! Per-component role registry.

use crate::error::AccessError;
use crate::role::{Role, RoleSet};
use hdn_types::AccountAddress;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The role grants owned by a single protocol component.
///
/// Every grant and revoke must be authorized by an account already holding
/// [`Role::Admin`] in this same registry; the deployer receives `Admin` at
/// construction, so the authorization graph is rooted there.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleRegistry {
    grants: HashMap<AccountAddress, RoleSet>,
}

impl RoleRegistry {
    /// Create a registry with `admin` holding the `Admin` role.
    pub fn with_admin(admin: AccountAddress) -> Self {
        let mut grants = HashMap::new();
        grants.insert(admin, RoleSet::single(Role::Admin));
        Self { grants }
    }

    /// Create a registry with `admin` holding `Admin` plus extra roles.
    pub fn with_admin_and(admin: AccountAddress, extra: &[Role]) -> Self {
        let mut set = RoleSet::single(Role::Admin);
        for role in extra {
            set.insert(*role);
        }
        let mut grants = HashMap::new();
        grants.insert(admin, set);
        Self { grants }
    }

    pub fn has_role(&self, account: &AccountAddress, role: Role) -> bool {
        self.grants
            .get(account)
            .map(|set| set.contains(role))
            .unwrap_or(false)
    }

    /// Error unless `account` holds `role`.
    pub fn require(&self, account: &AccountAddress, role: Role) -> Result<(), AccessError> {
        if self.has_role(account, role) {
            Ok(())
        } else {
            Err(AccessError::MissingRole {
                account: account.clone(),
                required: role,
            })
        }
    }

    /// Grant `role` to `to`. `caller` must be an admin of this registry.
    pub fn grant(
        &mut self,
        caller: &AccountAddress,
        role: Role,
        to: &AccountAddress,
    ) -> Result<(), AccessError> {
        self.require(caller, Role::Admin)?;
        self.grants.entry(to.clone()).or_default().insert(role);
        Ok(())
    }

    /// Revoke `role` from `from`. `caller` must be an admin of this registry.
    pub fn revoke(
        &mut self,
        caller: &AccountAddress,
        role: Role,
        from: &AccountAddress,
    ) -> Result<(), AccessError> {
        self.require(caller, Role::Admin)?;
        if let Some(set) = self.grants.get_mut(from) {
            set.remove(role);
            if set.is_empty() {
                self.grants.remove(from);
            }
        }
        Ok(())
    }

    /// All accounts with at least one role, with their role sets.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountAddress, &RoleSet)> {
        self.grants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> AccountAddress {
        AccountAddress::from_bytes(&[n; 20])
    }

    #[test]
    fn deployer_is_admin() {
        let registry = RoleRegistry::with_admin(addr(1));
        assert!(registry.has_role(&addr(1), Role::Admin));
        assert!(!registry.has_role(&addr(2), Role::Admin));
    }

    #[test]
    fn admin_can_grant_and_revoke() {
        let mut registry = RoleRegistry::with_admin(addr(1));
        registry.grant(&addr(1), Role::Treasury, &addr(2)).unwrap();
        assert!(registry.has_role(&addr(2), Role::Treasury));

        registry.revoke(&addr(1), Role::Treasury, &addr(2)).unwrap();
        assert!(!registry.has_role(&addr(2), Role::Treasury));
    }

    #[test]
    fn non_admin_cannot_grant() {
        let mut registry = RoleRegistry::with_admin(addr(1));
        let err = registry.grant(&addr(2), Role::Yield, &addr(3)).unwrap_err();
        match err {
            AccessError::MissingRole { account, required } => {
                assert_eq!(account, addr(2));
                assert_eq!(required, Role::Admin);
            }
        }
    }

    #[test]
    fn require_reports_the_missing_role() {
        let registry = RoleRegistry::with_admin_and(addr(1), &[Role::Treasury]);
        assert!(registry.require(&addr(1), Role::Treasury).is_ok());
        let err = registry.require(&addr(1), Role::Yield).unwrap_err();
        let AccessError::MissingRole { required, .. } = err;
        assert_eq!(required, Role::Yield);
    }
}
