//! Role-based access control for protocol components.
//!
//! The ledger, the yield manager, and each NFT collection carry their own
//! [`RoleRegistry`]; authorization between components is wired explicitly by
//! granting a role to the peer's address at deployment time. Roles are a
//! small closed enum checked through typed permission sets — there are no
//! hash-constant role identifiers and no process-wide grant table.

pub mod error;
pub mod registry;
pub mod role;

pub use error::AccessError;
pub use registry::RoleRegistry;
pub use role::{Role, RoleSet};
