//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which deployment environment the daemon operates against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production deployment.
    Live,
    /// The public test deployment.
    Test,
    /// Local development.
    Dev,
}

impl NetworkId {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }

    /// Default data directory name for this network, so switching networks
    /// never mixes ledgers.
    pub fn default_data_dir(&self) -> &'static str {
        match self {
            Self::Live => "./hdn_data",
            Self::Test => "./hdn_data_test",
            Self::Dev => "./hdn_data_dev",
        }
    }
}
