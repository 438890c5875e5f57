use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use super::calculator::compare;
use super::error::{ensure_non_negative, TariffError};
use super::CostComparison;
use crate::debug_println;
use crate::i18n::Language;

/// Fuel price table cache, filled on first load
static FUEL_PRICE_CACHE: Lazy<RwLock<Option<FuelPriceTable>>> = Lazy::new(|| RwLock::new(None));

/// Old and new price per litre for one fuel grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPrice {
    /// ASCII name used for lookups, e.g. `--fuel "Jayyid 91=40"`
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    pub old_price: f64,
    pub new_price: f64,
}

/// Read-only fuel price list, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPriceTable {
    pub fuels: Vec<FuelPrice>,
}

/// Litres bought of one fuel and what they cost under each schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelLine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    pub liters: f64,
    pub old_cost: f64,
    pub new_cost: f64,
}

/// Aggregated fuel comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelResult {
    pub lines: Vec<FuelLine>,
    pub total_liters: f64,
    pub old_cost: f64,
    pub new_cost: f64,
    pub difference: f64,
    pub percent_change: f64,
}

fn localized<'a>(name: &'a str, name_ar: Option<&'a str>, language: Language) -> &'a str {
    match (language, name_ar) {
        (Language::Arabic, Some(name_ar)) => name_ar,
        _ => name,
    }
}

impl FuelPrice {
    /// Name shown to the user; falls back to `name` when no Arabic name is set
    pub fn display_name(&self, language: Language) -> &str {
        localized(&self.name, self.name_ar.as_deref(), language)
    }
}

impl FuelLine {
    pub fn display_name(&self, language: Language) -> &str {
        localized(&self.name, self.name_ar.as_deref(), language)
    }
}

impl FuelResult {
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total_liters: 0.0,
            old_cost: 0.0,
            new_cost: 0.0,
            difference: 0.0,
            percent_change: 0.0,
        }
    }

    pub fn comparison(&self) -> CostComparison {
        CostComparison {
            old_cost: self.old_cost,
            new_cost: self.new_cost,
            difference: self.difference,
            percent_change: self.percent_change,
        }
    }
}

impl FuelPriceTable {
    /// Bahrain pump prices (BHD per litre)
    pub fn builtin() -> Self {
        let fuel = |name: &str, name_ar: &str, old_price, new_price| FuelPrice {
            name: name.to_string(),
            name_ar: Some(name_ar.to_string()),
            old_price,
            new_price,
        };

        Self {
            fuels: vec![
                fuel("Jayyid 91", "جيد 91", 0.14, 0.22),
                fuel("Mumtaz 95", "ممتاز 95", 0.20, 0.235),
                fuel("Super 98", "سوبر 98", 0.235, 0.265),
                fuel("Diesel", "ديزل", 0.18, 0.20),
            ],
        }
    }

    /// Load a price table from a `.json` array or a TOML file with `[[fuels]]` entries
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TariffError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let table = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let fuels: Vec<FuelPrice> = serde_json::from_str(&content)?;
            FuelPriceTable { fuels }
        } else {
            toml::from_str(&content)?
        };

        table.validate()?;
        debug_println!(
            "Loaded {} fuel prices from {}",
            table.fuels.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load once per process, falling back to the built-in table
    pub fn get_with_fallback(path: Option<&Path>) -> FuelPriceTable {
        if let Some(cached) = FUEL_PRICE_CACHE
            .read()
            .ok()
            .and_then(|cache| cache.as_ref().cloned())
        {
            return cached;
        }

        let table = match path {
            Some(path) => match Self::load_from_path(path) {
                Ok(table) => table,
                Err(e) => {
                    eprintln!("Failed to load fuel prices from {}: {}", path.display(), e);
                    eprintln!("Using built-in fuel prices");
                    Self::builtin()
                }
            },
            None => Self::builtin(),
        };

        if let Ok(mut cache) = FUEL_PRICE_CACHE.write() {
            *cache = Some(table.clone());
        }

        table
    }

    pub fn validate(&self) -> Result<(), TariffError> {
        if self.fuels.is_empty() {
            return Err(TariffError::CorruptedConfig(
                "fuel price table is empty".to_string(),
            ));
        }
        for fuel in &self.fuels {
            ensure_non_negative("old fuel price", fuel.old_price)?;
            ensure_non_negative("new fuel price", fuel.new_price)?;
        }
        Ok(())
    }

    /// Case-insensitive lookup by fuel name, or exact match on the Arabic name
    pub fn find(&self, name: &str) -> Option<&FuelPrice> {
        let name = name.trim();
        self.fuels.iter().find(|fuel| {
            fuel.name.eq_ignore_ascii_case(name) || fuel.name_ar.as_deref() == Some(name)
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.fuels.iter().map(|fuel| fuel.name.as_str()).collect()
    }
}

/// Price each (fuel name, litres) pair under both schedules and compare the totals
pub fn aggregate_fuel(
    table: &FuelPriceTable,
    purchases: &[(String, f64)],
) -> Result<FuelResult, TariffError> {
    let mut lines = Vec::with_capacity(purchases.len());

    for (name, liters) in purchases {
        let liters = ensure_non_negative("liters", *liters)?;
        let price = table
            .find(name)
            .ok_or_else(|| TariffError::UnknownFuel(name.clone()))?;

        lines.push(FuelLine {
            name: price.name.clone(),
            name_ar: price.name_ar.clone(),
            liters,
            old_cost: liters * price.old_price,
            new_cost: liters * price.new_price,
        });
    }

    let total_liters = lines.iter().map(|l| l.liters).sum();
    let old_cost = lines.iter().map(|l| l.old_cost).sum();
    let new_cost = lines.iter().map(|l| l.new_cost).sum();
    let comparison = compare(old_cost, new_cost);

    Ok(FuelResult {
        lines,
        total_liters,
        old_cost,
        new_cost,
        difference: comparison.difference,
        percent_change: comparison.percent_change,
    })
}

/// Clear the fuel price cache (useful for testing)
pub fn clear_fuel_price_cache() {
    if let Ok(mut cache) = FUEL_PRICE_CACHE.write() {
        *cache = None;
    }
}
