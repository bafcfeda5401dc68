//! Access-control errors.

use crate::role::Role;
use hdn_types::AccountAddress;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("account {account} is missing the {required} role")]
    MissingRole {
        account: AccountAddress,
        required: Role,
    },
}
