use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lattic3 lending client", long_about = None)]
pub(crate) struct Cli {
    /// Base URL of the gateway API.
    #[arg(long, env = "GATEWAY_URL")]
    pub(crate) gateway_url: String,

    /// Market configuration (JSON).
    #[arg(long, env = "MARKET_CONFIG", default_value = "config/market.json")]
    pub(crate) market_config: PathBuf,

    #[arg(long, env = "ACCOUNT_ADDRESS")]
    pub(crate) account: Option<String>,

    /// Wallet balance lookups in flight per side.
    #[arg(long, env = "BALANCE_CONCURRENCY", default_value_t = 4)]
    pub(crate) balance_concurrency: usize,

    /// Gateway request timeout, in seconds.
    #[arg(long, env = "GATEWAY_TIMEOUT_SECS", default_value_t = 10)]
    pub(crate) gateway_timeout_secs: u64,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub(crate) enum Command {
    /// Print the portfolio snapshot of the account.
    Portfolio,
    /// Print the market rows, with wallet balances when an account is given.
    Markets,
}
