use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::BINANCE;

/// The fixed set of pairs the dashboard offers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Default,
)]
pub enum Symbol {
    #[default]
    #[strum(serialize = "BTC-USD")]
    BtcUsd,
    #[strum(serialize = "ETH-USD")]
    EthUsd,
    #[strum(serialize = "ADA-USD")]
    AdaUsd,
}

impl Symbol {
    pub fn base_asset(&self) -> &'static str {
        match self {
            Self::BtcUsd => "BTC",
            Self::EthUsd => "ETH",
            Self::AdaUsd => "ADA",
        }
    }

    /// The name we pass into the Binance API (not the display name)
    pub fn bn_name(&self) -> String {
        format!("{}{}", self.base_asset(), BINANCE.quote_asset)
    }

    /// File name offered by the download button.
    pub fn csv_filename(&self) -> String {
        format!("{}.csv", self)
    }
}
