//! Turns the position badge of an account into a valued portfolio with
//! health ratio, net worth and value-weighted yields.

pub mod decoder;
pub mod error;
pub mod reconciler;
pub mod risk;
pub mod service;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use decoder::{
    DecodedPosition, PositionLookup, RawPositionEntry, decode_position, lookup_position,
};
pub use error::PortfolioError;
pub use reconciler::{ReconciledSide, ValuedAsset, reconcile};
pub use risk::{HealthRatio, aggregate, borrow_power_used, weighted_apy};
pub use service::{PortfolioConfig, PortfolioService};
pub use snapshot::PortfolioSnapshot;
