mod cli;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use lattic3_controller::{MarketRow, format_health, format_pct, format_usd};
use lattic3_gateway::{GatewayApiClient, GatewayClient};
use lattic3_portfolio::{PortfolioConfig, PortfolioService, PortfolioSnapshot};
use lattic3_quoting::{GatewayBalanceResolver, MarketConfig, QuotedPrices};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn init_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct PortfolioReport<'a> {
    account: &'a str,
    #[serde(flatten)]
    snapshot: &'a PortfolioSnapshot,
    display: SnapshotDisplay,
}

#[derive(Serialize)]
struct SnapshotDisplay {
    total_supply_value: String,
    total_debt_value: String,
    net_worth: String,
    health_ratio: String,
    supply_apy: String,
    borrow_apy: String,
    net_apy: String,
    borrow_power_used: String,
}

impl From<&PortfolioSnapshot> for SnapshotDisplay {
    fn from(snapshot: &PortfolioSnapshot) -> Self {
        Self {
            total_supply_value: format_usd(snapshot.total_supply_value),
            total_debt_value: format_usd(snapshot.total_debt_value),
            net_worth: format_usd(snapshot.net_worth),
            health_ratio: format_health(snapshot.health_ratio),
            supply_apy: format_pct(snapshot.supply_apy),
            borrow_apy: format_pct(snapshot.borrow_apy),
            net_apy: format_pct(snapshot.net_apy),
            borrow_power_used: format_pct(snapshot.borrow_power_used),
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logger();

    let cli = Cli::parse();

    let market = MarketConfig::from_file(&cli.market_config).with_context(|| {
        format!(
            "Failed to load market config from {}",
            cli.market_config.display()
        )
    })?;
    let market = Arc::new(market);
    tracing::info!(assets = market.catalog.len(), "Loaded market config");

    let config = PortfolioConfig {
        balance_concurrency: cli.balance_concurrency,
        gateway_timeout: Duration::from_secs(cli.gateway_timeout_secs),
        ..PortfolioConfig::default()
    };

    let gateway: Arc<dyn GatewayClient> = Arc::new(
        GatewayApiClient::new(&cli.gateway_url, config.gateway_timeout)
            .context("Invalid gateway URL")?,
    );
    let resolver = GatewayBalanceResolver::new(
        gateway.clone(),
        Arc::new(market.catalog.clone()),
        Arc::new(QuotedPrices::from_catalog(&market.catalog)),
        config.balance_cache_ttl,
    );
    let service = PortfolioService::new(gateway, Arc::new(resolver), market.clone(), config);

    match cli.command {
        Command::Portfolio => {
            let account = cli
                .account
                .as_deref()
                .context("An account address is required (--account or ACCOUNT_ADDRESS)")?;
            let snapshot = service
                .refresh(Some(account))
                .await
                .context("Failed to refresh portfolio")?;
            print_json(&PortfolioReport {
                account,
                snapshot: &snapshot,
                display: SnapshotDisplay::from(&snapshot),
            })?;
        }
        Command::Markets => {
            let mut rows = MarketRow::from_catalog(&market.catalog);
            if let Some(account) = cli.account.as_deref() {
                let balances = service
                    .wallet_balances(account)
                    .await
                    .context("Failed to fetch wallet balances")?;
                for (label, balance) in balances {
                    if let Some(row) = rows.iter_mut().find(|row| row.label == label) {
                        row.wallet_balance = Some(balance);
                    }
                }
            }
            print_json(&rows)?;
        }
    }

    Ok(())
}
