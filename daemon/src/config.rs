//! Daemon configuration with TOML file support.

use hdn_types::NetworkId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the HDN daemon.
///
/// Can be loaded from a TOML file via [`DaemonConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). File settings are the base;
/// CLI flags and env vars override them.
///
/// Monetary values are whole units (TOML integers are signed 64-bit, so
/// raw 18-decimal values don't fit); they are scaled up when applied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Which deployment environment this daemon operates against.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Data directory for LMDB storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Path to the JSON credentials file.
    #[serde(default = "default_accounts_file")]
    pub accounts_file: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Mint price for the collection, in whole native coins.
    #[serde(default = "default_mint_price")]
    pub mint_price: u64,

    /// Maximum number of tokens the collection may mint (none = unlimited).
    #[serde(default)]
    pub max_supply: Option<u64>,

    /// Yield rate installed at init, whole HDN per token per day.
    #[serde(default = "default_yield_rate")]
    pub yield_rate_per_day: u64,

    /// End of the yield program installed at init, Unix seconds.
    #[serde(default = "default_yield_end")]
    pub yield_end_time: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Dev
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(NetworkId::Dev.default_data_dir())
}

fn default_accounts_file() -> PathBuf {
    PathBuf::from("./accounts.json")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 500 whole native coins per mint.
fn default_mint_price() -> u64 {
    500
}

/// 10 whole HDN per token per day.
fn default_yield_rate() -> u64 {
    10
}

fn default_yield_end() -> u64 {
    hdn_types::YieldParams::DEFAULT_END_TIME
}

impl Default for DaemonConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config must deserialize from defaults")
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
