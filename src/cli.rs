use clap::Parser;
use std::path::PathBuf;

use crate::billing::{InputMode, Utility};
use crate::i18n::Language;

#[derive(Parser, Debug)]
#[command(name = "tariffcalc")]
#[command(version, about = "Compare old and new Bahrain utility tariffs")]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Utility to calculate
    #[arg(short = 'u', long = "utility", value_enum, default_value = "electricity")]
    pub utility: Utility,

    /// Consumption in kWh (electricity) or m³ (water)
    #[arg(long, value_name = "AMOUNT", conflicts_with = "bill")]
    pub usage: Option<f64>,

    /// Previous bill in BHD; usage is inferred from the old tariff
    #[arg(long, value_name = "BHD")]
    pub bill: Option<f64>,

    /// Litres of one fuel type, repeatable (e.g. --fuel "Jayyid 91=40")
    #[arg(long = "fuel", value_name = "NAME=LITERS", value_parser = parse_fuel_purchase)]
    pub fuel: Vec<(String, f64)>,

    /// Fuel price table (TOML or JSON) overriding the configured one
    #[arg(long = "fuel-prices", value_name = "FILE")]
    pub fuel_prices: Option<PathBuf>,

    /// Display language
    #[arg(short = 'l', long = "lang", value_enum)]
    pub lang: Option<Language>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Open the interactive calculator
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Input mode for slab utilities; `None` when neither amount was given
    pub fn input_mode(&self) -> Option<InputMode> {
        match (self.usage, self.bill) {
            (Some(usage), _) => Some(InputMode::Usage(usage)),
            (None, Some(bill)) => Some(InputMode::Bill(bill)),
            (None, None) => None,
        }
    }
}

/// Parse `NAME=LITERS`
pub fn parse_fuel_purchase(input: &str) -> Result<(String, f64), String> {
    let (name, liters) = input
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=LITERS, got '{}'", input))?;

    let name = name.trim();
    if name.is_empty() {
        return Err("fuel name is empty".to_string());
    }

    let liters: f64 = liters
        .trim()
        .parse()
        .map_err(|_| format!("invalid litres '{}'", liters.trim()))?;

    Ok((name.to_string(), liters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fuel_purchase() {
        assert_eq!(
            parse_fuel_purchase("Jayyid 91=40").unwrap(),
            ("Jayyid 91".to_string(), 40.0)
        );
        assert_eq!(
            parse_fuel_purchase(" Diesel = 12.5 ").unwrap(),
            ("Diesel".to_string(), 12.5)
        );
        assert!(parse_fuel_purchase("Diesel").is_err());
        assert!(parse_fuel_purchase("=3").is_err());
        assert!(parse_fuel_purchase("Diesel=lots").is_err());
    }

    #[test]
    fn test_input_mode_from_flags() {
        let cli = Cli::parse_from(["tariffcalc", "--bill", "5"]);
        assert_eq!(cli.input_mode(), Some(InputMode::Bill(5.0)));

        let cli = Cli::parse_from(["tariffcalc", "-u", "water", "--usage", "101.5"]);
        assert_eq!(cli.utility, Utility::Water);
        assert_eq!(cli.input_mode(), Some(InputMode::Usage(101.5)));

        let cli = Cli::parse_from(["tariffcalc"]);
        assert_eq!(cli.input_mode(), None);
    }

    #[test]
    fn test_usage_and_bill_conflict() {
        assert!(Cli::try_parse_from(["tariffcalc", "--usage", "1", "--bill", "2"]).is_err());
    }

    #[test]
    fn test_fuel_flags() {
        let cli = Cli::parse_from([
            "tariffcalc",
            "-u",
            "fuel",
            "--fuel",
            "Diesel=10",
            "--fuel",
            "Super 98=5",
            "--lang",
            "ar",
        ]);
        assert_eq!(cli.fuel.len(), 2);
        assert_eq!(cli.lang, Some(Language::Arabic));
    }
}
