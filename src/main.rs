use ewa_tariff::billing::calculator::calculate;
use ewa_tariff::billing::{aggregate_fuel, FuelPriceTable, Utility};
use ewa_tariff::cli::Cli;
use ewa_tariff::config::{Config, ConfigLoader};
use ewa_tariff::report;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        Config::init()?;
        return Ok(());
    }

    if cli.print {
        let config = ConfigLoader::load();
        config.print()?;
        return Ok(());
    }

    if cli.check {
        let config = Config::load()?;
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    let mut config = ConfigLoader::load();
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    if cli.fuel_prices.is_some() {
        config.fuel_prices = cli.fuel_prices.clone();
    }

    if cli.interactive {
        #[cfg(feature = "tui")]
        {
            ewa_tariff::ui::run_calculator(config)?;
        }
        #[cfg(not(feature = "tui"))]
        {
            eprintln!("TUI feature is not enabled. Please install with --features tui");
            std::process::exit(1);
        }
        return Ok(());
    }

    let texts = config.language.texts();
    let color = !cli.no_color && !cli.json;

    if cli.utility == Utility::Fuel {
        let prices = FuelPriceTable::get_with_fallback(config.fuel_prices.as_deref());
        let result = match aggregate_fuel(&prices, &cli.fuel) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Known fuel types: {}", prices.names().join(", "));
                std::process::exit(1);
            }
        };

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            match report::render_fuel_report(&result, config.language, color) {
                Some(out) => print!("{}", out),
                None => println!("No fuel entered. Use --fuel \"NAME=LITERS\"."),
            }
        }
        return Ok(());
    }

    let Some(table) = config.table_for(cli.utility) else {
        eprintln!("Error: No slab tariff configured for {:?}", cli.utility);
        std::process::exit(1);
    };

    let input = match cli.input_mode() {
        Some(input) => input,
        None => {
            eprintln!("Error: Provide either --usage or --bill");
            std::process::exit(1);
        }
    };

    let result = match calculate(input, &table.slabs) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            report::render_tariff_report(
                &result,
                table,
                texts,
                config.bar_width as usize,
                color
            )
        );
    }

    Ok(())
}
