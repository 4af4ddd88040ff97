use std::sync::Arc;

use lattic3_metrics::{MetricsRegistry, Outcome};
use lattic3_portfolio::{PortfolioError, PortfolioService};
use lattic3_types::{AssetLabel, Side};
use rust_decimal::Decimal;

use crate::{
    error::{ControllerError, TransactionError},
    notification::Notification,
    state::{RefreshOutput, RefreshTicket, ViewState},
    transaction::{
        AssetAmount, MANIFEST_VERSION, ManifestBuilder, TransactionReceipt, WalletClient,
        build_manifest,
    },
};

/// User intents the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect(String),
    Disconnect,
    Refresh,
    Select { side: Side, label: AssetLabel },
    Deselect { side: Side, label: AssetLabel },
    SetAmount { side: Side, label: AssetLabel, input: String },
    SetMax { side: Side, label: AssetLabel },
    OpenPreview(Side),
    CancelPreview(Side),
    ConfirmPreview(Side),
}

/// A refresh that has been issued a ticket but not run yet.
///
/// Owns everything it needs so it can run on another task while the
/// controller keeps handling commands.
pub struct PendingRefresh {
    ticket: RefreshTicket,
    service: PortfolioService,
    account: Option<String>,
}

pub struct CompletedRefresh {
    ticket: RefreshTicket,
    result: Result<RefreshOutput, PortfolioError>,
}

impl PendingRefresh {
    pub const fn ticket(&self) -> RefreshTicket {
        self.ticket
    }

    pub async fn run(self) -> CompletedRefresh {
        let result: Result<RefreshOutput, PortfolioError> = async {
            let account = self
                .account
                .as_deref()
                .ok_or(PortfolioError::NotConnected)?;
            let (snapshot, balances) = futures::try_join!(
                self.service.refresh(Some(account)),
                self.service.wallet_balances(account),
            )?;
            Ok(RefreshOutput { snapshot, balances })
        }
        .await;

        CompletedRefresh {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct PortfolioController {
    service: PortfolioService,
    manifests: Arc<dyn ManifestBuilder>,
    wallet: Arc<dyn WalletClient>,
    metrics: Arc<MetricsRegistry>,
    state: ViewState,
}

impl PortfolioController {
    pub fn new(
        service: PortfolioService,
        manifests: Arc<dyn ManifestBuilder>,
        wallet: Arc<dyn WalletClient>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let state = ViewState::new(&service.market().catalog);
        Self {
            service,
            manifests,
            wallet,
            metrics,
            state,
        }
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.state.take_notifications()
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<(), ControllerError> {
        tracing::debug!(command = ?command, "Dispatching command");

        match command {
            Command::Connect(account) => {
                tracing::info!(account = %account, "Wallet connected");
                self.state.set_account(Some(account));
                self.refresh().await?;
            }
            Command::Disconnect => {
                tracing::info!("Wallet disconnected");
                self.state.set_account(None);
            }
            Command::Refresh => {
                self.refresh().await?;
            }
            Command::Select { side, label } => {
                self.row_max(side, label)?;
                self.state.selection_mut(side).select(label);
            }
            Command::Deselect { side, label } => {
                self.state.selection_mut(side).deselect(label);
            }
            Command::SetAmount { side, label, input } => {
                let max = self.row_max(side, label)?;
                self.state
                    .selection_mut(side)
                    .set_amount(label, &input, max)?;
            }
            Command::SetMax { side, label } => {
                let max = self.row_max(side, label)?;
                self.state
                    .selection_mut(side)
                    .set_amount(label, &max.to_string(), max)?;
            }
            Command::OpenPreview(side) => {
                if let Err(err) = self.state.selection_mut(side).open_preview() {
                    self.state
                        .notify(Notification::error("Invalid Selection", &err));
                    return Err(err.into());
                }
            }
            Command::CancelPreview(side) => {
                self.state.selection_mut(side).cancel_preview();
            }
            Command::ConfirmPreview(side) => {
                self.confirm(side).await?;
            }
        }
        Ok(())
    }

    fn row_max(&self, side: Side, label: AssetLabel) -> Result<Decimal, ControllerError> {
        self.state
            .market(label)
            .map(|row| row.max_for(side))
            .ok_or(ControllerError::UnknownAsset(label))
    }

    /// Issue a ticket for a new refresh. Any refresh started earlier is superseded.
    pub fn start_refresh(&mut self) -> PendingRefresh {
        PendingRefresh {
            ticket: self.state.begin_refresh(),
            service: self.service.clone(),
            account: self.state.account().map(str::to_string),
        }
    }

    pub fn apply_refresh(&mut self, completed: CompletedRefresh) -> Result<Outcome, ControllerError> {
        let result = self
            .state
            .finish_refresh(completed.ticket, completed.result);
        let outcome = result.as_ref().map_or(Outcome::Failure, |outcome| *outcome);
        self.metrics.portfolio.record_refresh(outcome);
        Ok(result?)
    }

    pub async fn refresh(&mut self) -> Result<Outcome, ControllerError> {
        let completed = self.start_refresh().run().await;
        self.apply_refresh(completed)
    }

    async fn confirm(&mut self, side: Side) -> Result<(), ControllerError> {
        let lines = match self.state.selection_mut(side).take_confirmed() {
            Ok(lines) => lines,
            Err(err) => {
                self.state
                    .notify(Notification::error("Invalid Selection", &err));
                return Err(err.into());
            }
        };
        let action = match side {
            Side::Supply => "Supply",
            Side::Borrow => "Borrow",
        };

        match self.submit(side, &lines).await {
            Ok(receipt) => {
                self.metrics
                    .portfolio
                    .record_transaction(side.as_ref(), Outcome::Success);
                tracing::info!(
                    side = %side,
                    assets = lines.len(),
                    transaction = %receipt.transaction_intent_hash,
                    "Transaction submitted"
                );

                let verb = match side {
                    Side::Supply => "Supplied",
                    Side::Borrow => "Borrowed",
                };
                self.state.notify(Notification::success(
                    format!("{action} Successful"),
                    format!("{verb} {} assets", lines.len()),
                ));

                if let Some(account) = self.state.account().map(str::to_string) {
                    self.service.resolver().invalidate_account(&account).await;
                }
                // The transaction went through even if the follow-up refresh fails.
                if let Err(err) = self.refresh().await {
                    tracing::warn!(error = %err, "Refresh after transaction failed");
                }
                Ok(())
            }
            Err(err) => {
                self.metrics
                    .portfolio
                    .record_transaction(side.as_ref(), Outcome::Failure);
                tracing::error!(side = %side, error = %err, "Transaction failed");

                let title = match err {
                    TransactionError::NotConnected | TransactionError::NoPosition => {
                        "Error".to_string()
                    }
                    _ => format!("{action} Failed"),
                };
                self.state.notify(Notification::error(title, &err));
                Err(err.into())
            }
        }
    }

    async fn submit(
        &self,
        side: Side,
        lines: &[(AssetLabel, Decimal)],
    ) -> Result<TransactionReceipt, TransactionError> {
        let account = self
            .state
            .account()
            .ok_or(TransactionError::NotConnected)?;

        let component = self.service.market().market_component.trim();
        if component.is_empty() {
            return Err(TransactionError::Config(
                "Market component not configured".to_string(),
            ));
        }

        let assets: Vec<AssetAmount> = lines
            .iter()
            .filter_map(|(label, amount)| {
                self.state.market(*label).map(|row| AssetAmount {
                    address: row.address.clone(),
                    amount: *amount,
                })
            })
            .collect();

        // Read the badge from the ledger: the snapshot may predate a position opened elsewhere.
        let badge = self.service.position_badge(account).await?;
        let manifest = build_manifest(
            self.manifests.as_ref(),
            side,
            component,
            account,
            badge.as_ref(),
            &assets,
        )?;
        tracing::debug!(side = %side, manifest = %manifest, "Built transaction manifest");

        Ok(self
            .wallet
            .send_transaction(&manifest, MANIFEST_VERSION)
            .await?)
    }
}
