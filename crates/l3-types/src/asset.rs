use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Assets supported by the market. The label is the stable join key between
/// on-chain resource addresses and catalog data.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AssetLabel {
    #[serde(rename = "XRD")]
    #[strum(serialize = "XRD")]
    Xrd,
    #[serde(rename = "USDC")]
    #[strum(serialize = "USDC")]
    Usdc,
    #[serde(rename = "USDT")]
    #[strum(serialize = "USDT")]
    Usdt,
    #[serde(rename = "HUG")]
    #[strum(serialize = "HUG")]
    Hug,
    #[serde(rename = "xwBTC")]
    #[strum(serialize = "xwBTC")]
    XwBtc,
    #[serde(rename = "xETH")]
    #[strum(serialize = "xETH")]
    XEth,
}
