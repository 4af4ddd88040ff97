use chrono::{DateTime, Utc};
use lattic3_metrics::Outcome;
use lattic3_portfolio::{PortfolioError, PortfolioSnapshot};
use lattic3_quoting::AssetCatalog;
use lattic3_types::{AssetLabel, Side};
use rust_decimal::Decimal;

use crate::{
    market::MarketRow,
    notification::Notification,
    selection::SideSelection,
};

/// Identifies one refresh. Only the most recently issued ticket may replace the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Everything a refresh produced for the connected account.
#[derive(Debug, Clone)]
pub struct RefreshOutput {
    pub snapshot: PortfolioSnapshot,
    pub balances: Vec<(AssetLabel, Decimal)>,
}

/// What the user currently sees.
#[derive(Debug, Clone)]
pub struct ViewState {
    account: Option<String>,
    snapshot: PortfolioSnapshot,
    markets: Vec<MarketRow>,
    supply: SideSelection,
    borrow: SideSelection,
    notifications: Vec<Notification>,
    latest: u64,
    loading: bool,
    last_refreshed_at: Option<DateTime<Utc>>,
}

impl ViewState {
    pub fn new(catalog: &AssetCatalog) -> Self {
        Self {
            account: None,
            snapshot: PortfolioSnapshot::empty(),
            markets: MarketRow::from_catalog(catalog),
            supply: SideSelection::new(Side::Supply),
            borrow: SideSelection::new(Side::Borrow),
            notifications: Vec::new(),
            latest: 0,
            loading: false,
            last_refreshed_at: None,
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub const fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    pub fn markets(&self) -> &[MarketRow] {
        &self.markets
    }

    pub fn market(&self, label: AssetLabel) -> Option<&MarketRow> {
        self.markets.iter().find(|row| row.label == label)
    }

    pub const fn selection(&self, side: Side) -> &SideSelection {
        match side {
            Side::Supply => &self.supply,
            Side::Borrow => &self.borrow,
        }
    }

    pub fn selection_mut(&mut self, side: Side) -> &mut SideSelection {
        match side {
            Side::Supply => &mut self.supply,
            Side::Borrow => &mut self.borrow,
        }
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Switch account. Everything derived from the previous one is dropped.
    pub fn set_account(&mut self, account: Option<String>) {
        self.account = account;
        self.snapshot = PortfolioSnapshot::empty();
        for row in &mut self.markets {
            row.wallet_balance = None;
        }
        self.supply.reset();
        self.borrow.reset();
        // Results of refreshes started for the old account must not land.
        self.latest += 1;
        self.loading = false;
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.latest += 1;
        self.loading = true;
        RefreshTicket(self.latest)
    }

    pub const fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply the result of the refresh identified by `ticket`.
    ///
    /// Results of superseded refreshes are discarded, errors included. A failed
    /// refresh keeps the previous snapshot and is reported to the user.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<RefreshOutput, PortfolioError>,
    ) -> Result<Outcome, PortfolioError> {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "Discarding superseded refresh");
            return Ok(Outcome::Superseded);
        }
        self.loading = false;

        match result {
            Ok(output) => {
                self.replace(output);
                self.last_refreshed_at = Some(Utc::now());
                Ok(Outcome::Success)
            }
            Err(err) => {
                tracing::error!(error = %err, "Portfolio refresh failed");
                self.notify(Notification::error("Error", &err));
                Err(err)
            }
        }
    }

    fn replace(&mut self, output: RefreshOutput) {
        self.snapshot = output.snapshot;
        for (label, balance) in output.balances {
            if let Some(row) = self.markets.iter_mut().find(|row| row.label == label) {
                row.wallet_balance = Some(balance);
            }
        }

        let markets = &self.markets;
        for side in [Side::Supply, Side::Borrow] {
            let selection = match side {
                Side::Supply => &mut self.supply,
                Side::Borrow => &mut self.borrow,
            };
            selection.revalidate(|label| {
                markets
                    .iter()
                    .find(|row| row.label == label)
                    .map(|row| row.max_for(side))
            });
        }
    }
}
