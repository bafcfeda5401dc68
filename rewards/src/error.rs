//! Yield-engine errors.

use hdn_access::AccessError;
use hdn_types::{AccountAddress, TokenId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YieldError {
    #[error("cannot claim for another address")]
    Unauthorized {
        caller: AccountAddress,
        owner: AccountAddress,
    },

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("no rewards available")]
    NothingToClaim,

    #[error("collection {0} has no yield configuration")]
    UnknownCollection(AccountAddress),

    #[error("token {0} is not tracked for this collection")]
    UnknownToken(TokenId),

    #[error("token {0} is already tracked for this collection")]
    TokenAlreadyTracked(TokenId),

    #[error("token {token} is not owned by {claimed}")]
    OwnerMismatch {
        token: TokenId,
        claimed: AccountAddress,
    },

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error(transparent)]
    Sink(#[from] crate::sink::SinkError),

    #[error("{0}")]
    Other(String),
}
