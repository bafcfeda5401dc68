//! Credentials-file errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("credentials file is malformed: {0}")]
    Parse(String),

    #[error("account '{0}' already exists")]
    AccountExists(String),

    #[error("unknown account '{0}'")]
    UnknownAccount(String),

    #[error("key error: {0}")]
    Key(String),
}

impl From<std::io::Error> for AccountsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
