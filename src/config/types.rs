use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::billing::{TariffTable, Utility};
use crate::i18n::Language;

use super::defaults::default_bar_width;

/// User configuration stored at `~/.ewa-tariff/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub language: Language,
    /// Character width of the stacked usage bar
    #[serde(default = "default_bar_width")]
    pub bar_width: u16,
    /// External fuel price table; the built-in one is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_prices: Option<PathBuf>,
    #[serde(default = "TariffTable::electricity")]
    pub electricity: TariffTable,
    #[serde(default = "TariffTable::water")]
    pub water: TariffTable,
}

impl Config {
    /// Slab table for a utility; fuel has none
    pub fn table_for(&self, utility: Utility) -> Option<&TariffTable> {
        match utility {
            Utility::Electricity => Some(&self.electricity),
            Utility::Water => Some(&self.water),
            Utility::Fuel => None,
        }
    }
}
