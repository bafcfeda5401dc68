//! HDN daemon — entry point for operating a local HDN deployment.

mod commands;
mod config;

use clap::Parser;
use commands::{App, RoleTarget};
use config::DaemonConfig;
use hdn_access::Role;
use hdn_types::{NetworkId, Timestamp};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hdn-daemon", about = "HDN yield protocol daemon")]
struct Cli {
    /// Network to operate on: "live", "test", or "dev".
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, env = "HDN_NETWORK")]
    network: Option<String>,

    /// Data directory for LMDB storage.
    #[arg(long, env = "HDN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to the JSON credentials file.
    #[arg(long, env = "HDN_ACCOUNTS_FILE")]
    accounts_file: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "HDN_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, env = "HDN_LOG_FORMAT")]
    log_format: Option<String>,

    /// Operation timestamp in Unix seconds (defaults to the wall clock).
    /// The engine itself never reads the clock, so replays are exact.
    #[arg(long)]
    at: Option<u64>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy the ledger, yield manager, and collection, and wire roles.
    Init,
    /// Manage the local credentials file.
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Mint the next NFT to an account (pays the mint price).
    Mint {
        /// Minter: account name or 0x address.
        account: String,
        /// Payment in whole native coins (defaults to the mint price).
        #[arg(long)]
        payment: Option<u64>,
    },
    /// Transfer an NFT between accounts (settles the sender's accrual).
    Transfer {
        /// Current owner: account name or 0x address.
        from: String,
        /// Recipient: account name or 0x address.
        to: String,
        /// Token id.
        token: u64,
    },
    /// Show pending (claimable) rewards for an account.
    Pending {
        /// Owner: account name or 0x address.
        account: String,
    },
    /// Claim all pending rewards for an account onto the HDN ledger.
    Claim {
        /// Owner: account name or 0x address.
        account: String,
    },
    /// Show an account's HDN balance.
    Balance {
        /// Account name or 0x address.
        account: String,
    },
    /// Show ledger supply, collection stats, and yield parameters.
    Status,
    /// Replace the collection's yield parameters (operator only).
    SetYield {
        /// Whole HDN accrued per token per day.
        #[arg(long)]
        rate: u64,
        /// End of the program, Unix seconds.
        #[arg(long)]
        end: u64,
    },
    /// Grant a role on a component's registry (operator only).
    GrantRole {
        /// Which registry: "ledger" or "manager".
        #[arg(long, value_enum)]
        on: RoleTarget,
        /// Role: "admin", "minter", "treasury", or "yield".
        #[arg(long)]
        role: Role,
        /// Grantee: account name or 0x address.
        to: String,
    },
}

#[derive(clap::Subcommand)]
enum AccountAction {
    /// Create a new account and persist its credentials.
    New { name: String },
    /// List stored accounts.
    List,
}

fn parse_network(s: &str) -> NetworkId {
    match s.to_lowercase().as_str() {
        "live" => NetworkId::Live,
        "test" => NetworkId::Test,
        _ => NetworkId::Dev,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: Option<DaemonConfig> = if let Some(ref config_path) = cli.config {
        match DaemonConfig::from_toml_file(config_path) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!(
                    "failed to load config file {}: {e}, using defaults",
                    config_path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let mut config = file_config.unwrap_or_default();
    if let Some(network) = cli.network.as_deref().map(parse_network) {
        config.network = network;
        if cli.data_dir.is_none() && cli.config.is_none() {
            config.data_dir = PathBuf::from(network.default_data_dir());
        }
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(accounts_file) = cli.accounts_file {
        config.accounts_file = accounts_file;
    }
    config.log_level = cli.log_level;
    if let Some(log_format) = cli.log_format {
        config.log_format = log_format;
    }

    hdn_utils::init_tracing(&config.log_level, config.log_format == "json");

    let now = cli.at.map(Timestamp::new).unwrap_or_else(Timestamp::now);
    tracing::debug!(
        network = config.network.as_str(),
        at = now.as_secs(),
        "dispatching command"
    );

    let mut app = App::open(config)?;
    match cli.command {
        Command::Init => app.init(),
        Command::Account { action } => match action {
            AccountAction::New { name } => app.account_new(&name),
            AccountAction::List => app.account_list(),
        },
        Command::Mint { account, payment } => app.mint(&account, payment, now),
        Command::Transfer { from, to, token } => app.transfer(&from, &to, token, now),
        Command::Pending { account } => app.pending(&account, now),
        Command::Claim { account } => app.claim(&account, now),
        Command::Balance { account } => app.balance(&account),
        Command::Status => app.status(now),
        Command::SetYield { rate, end } => app.set_yield(rate, end),
        Command::GrantRole { on, role, to } => app.grant_role(on, role, &to),
    }
}
