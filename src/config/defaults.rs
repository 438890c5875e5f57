use super::types::Config;
use crate::billing::TariffTable;
use crate::i18n::Language;

pub const DEFAULT_BAR_WIDTH: u16 = 50;

pub(crate) fn default_bar_width() -> u16 {
    DEFAULT_BAR_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        let language = match std::env::var("TARIFF_LANG").as_deref() {
            Ok("ar") => Language::Arabic,
            _ => Language::English,
        };

        Config {
            language,
            bar_width: DEFAULT_BAR_WIDTH,
            fuel_prices: None,
            electricity: TariffTable::electricity(),
            water: TariffTable::water(),
        }
    }
}
