use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Which half of a position an entry belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Supply,
    Borrow,
}

impl Side {
    /// Name of the field holding this side's entries in the position badge data.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Supply => "supply",
            Self::Borrow => "borrow",
        }
    }
}
