use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub portfolio: Arc<PortfolioMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            portfolio: PortfolioMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct PortfolioMetrics {
    refreshes: Counter<u64>,
    transactions: Counter<u64>,
}

impl PortfolioMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("lattic3-client");
        let refreshes = meter
            .u64_counter("portfolio_refreshes_total")
            .with_description("Number of portfolio refreshes, by outcome")
            .with_unit("count")
            .init();

        let transactions = meter
            .u64_counter("transactions_submitted_total")
            .with_description("Number of transactions handed to the wallet, by side and outcome")
            .with_unit("count")
            .init();

        Arc::new(Self {
            refreshes,
            transactions,
        })
    }

    pub fn record_refresh(&self, outcome: Outcome) {
        self.refreshes
            .add(1, &[KeyValue::new("outcome", outcome.as_str())]);
    }

    pub fn record_transaction(&self, side: &str, outcome: Outcome) {
        self.transactions.add(
            1,
            &[
                KeyValue::new("side", side.to_string()),
                KeyValue::new("outcome", outcome.as_str()),
            ],
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    /// Result arrived after a newer refresh had started.
    Superseded,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Superseded => "superseded",
        }
    }
}
