use lattic3_portfolio::PortfolioError;
use lattic3_types::AssetLabel;
use rust_decimal::Decimal;
use thiserror::Error;

/// Problem with a single amount input, shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Please enter a valid number")]
    InvalidNumber,
    #[error("Amount must be greater than or equal to 0")]
    Negative,
    #[error("Amount cannot exceed {max}")]
    ExceedsMax { max: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("No assets selected")]
    NothingSelected,
    #[error("Invalid amount for {}", labels(.0))]
    InvalidRows(Vec<(AssetLabel, AmountError)>),
    #[error("Please ensure at least one selected asset has an amount greater than 0")]
    NoPositiveAmount,
    #[error("Preview is already open")]
    AlreadyOpen,
    #[error("Preview is not open")]
    NotOpen,
}

fn labels(rows: &[(AssetLabel, AmountError)]) -> String {
    rows.iter()
        .map(|(label, _)| label.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Transaction rejected: {0}")]
    Rejected(String),
    #[error("Transaction failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Wallet not connected")]
    NotConnected,
    #[error("No position NFT found. Please supply assets first.")]
    NoPosition,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
    #[error("Asset {0} is not listed")]
    UnknownAsset(AssetLabel),
}
