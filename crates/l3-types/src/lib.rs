pub mod asset;
pub mod side;

pub use asset::AssetLabel;
pub use side::Side;
