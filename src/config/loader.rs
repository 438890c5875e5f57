use super::types::Config;
use crate::billing::{TariffError, Utility};
use crate::debug_println;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load() -> Config {
        Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load configuration, using defaults: {}", e);
            Config::default()
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            debug_println!("No config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        let config = ConfigLoader::load_from_path(&config_path)?;
        debug_println!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path(Self::get_config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.ewa-tariff/config.toml)
    pub fn get_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".ewa-tariff").join("config.toml")
        } else {
            PathBuf::from(".ewa-tariff/config.toml")
        }
    }

    /// Initialize config directory and create default config
    pub fn init() -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            Config::default().save_to_path(&config_path)?;
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }

        Ok(())
    }

    /// Validate configuration
    pub fn check(&self) -> Result<(), TariffError> {
        for (utility, table) in [
            (Utility::Electricity, &self.electricity),
            (Utility::Water, &self.water),
        ] {
            if table.utility != utility {
                return Err(TariffError::InvalidSlabTable(format!(
                    "table configured for {:?} is marked as {:?}",
                    utility, table.utility
                )));
            }
            table.validate()?;
        }

        if self.bar_width == 0 {
            return Err(TariffError::CorruptedConfig(
                "bar_width must be greater than 0".to_string(),
            ));
        }

        if let Some(path) = &self.fuel_prices {
            if !path.exists() {
                return Err(TariffError::FileAccess(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("fuel price table not found: {}", path.display()),
                )));
            }
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::SlabRule;
    use crate::i18n::Language;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("ewa_tariff_config_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().check().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("round_trip.toml");
        let mut config = Config::default();
        config.language = Language::Arabic;
        config.bar_width = 30;

        config.save_to_path(&path).unwrap();
        let loaded = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "language = \"ar\"\n").unwrap();

        let loaded = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(loaded.language, Language::Arabic);
        assert_eq!(loaded.bar_width, crate::config::DEFAULT_BAR_WIDTH);
        assert_eq!(loaded.water.slabs.len(), 3);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_check_rejects_bad_tables() {
        let mut config = Config::default();
        config.water.slabs.push(SlabRule::limited(10.0, 0.1, 0.1));
        assert!(matches!(
            config.check(),
            Err(TariffError::InvalidSlabTable(_))
        ));

        let mut config = Config::default();
        config.electricity.utility = Utility::Water;
        assert!(config.check().is_err());

        let mut config = Config::default();
        config.water.colors = vec!["€€".to_string()];
        assert!(matches!(
            config.check(),
            Err(TariffError::CorruptedConfig(_))
        ));

        let mut config = Config::default();
        config.bar_width = 0;
        assert!(matches!(
            config.check(),
            Err(TariffError::CorruptedConfig(_))
        ));
    }

    #[test]
    fn test_check_missing_fuel_table() {
        let mut config = Config::default();
        config.fuel_prices = Some(PathBuf::from("/nonexistent/fuel.toml"));
        assert!(matches!(config.check(), Err(TariffError::FileAccess(_))));
    }

    #[test]
    fn test_table_for() {
        let config = Config::default();
        assert_eq!(
            config.table_for(Utility::Water).unwrap().utility,
            Utility::Water
        );
        assert!(config.table_for(Utility::Fuel).is_none());
    }
}
