//! Collection-registry errors.

use hdn_rewards::YieldError;
use hdn_types::{AccountAddress, NativeAmount, TokenId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("insufficient payment: mint price is {required}, received {provided}")]
    InsufficientPayment {
        required: NativeAmount,
        provided: NativeAmount,
    },

    #[error("invalid token id {0}")]
    InvalidTokenId(TokenId),

    #[error("token {token} is not owned by {account}")]
    NotTokenOwner {
        token: TokenId,
        account: AccountAddress,
    },

    #[error(transparent)]
    Yield(#[from] YieldError),

    #[error("{0}")]
    Other(String),
}
