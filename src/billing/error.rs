/// Error types for tariff calculations and tariff data loading
#[derive(Debug)]
pub enum TariffError {
    InvalidInput { field: &'static str, value: f64 },
    DivisionUndefined { slab: usize },
    InvalidSlabTable(String),
    UnknownFuel(String),
    FileAccess(std::io::Error),
    CorruptedConfig(String),
}

impl std::fmt::Display for TariffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TariffError::InvalidInput { field, value } => {
                write!(
                    f,
                    "Invalid {}: {} (must be a finite, non-negative number)",
                    field, value
                )
            }
            TariffError::DivisionUndefined { slab } => {
                write!(
                    f,
                    "Usage is undefined for slab {}: its unit price is zero",
                    slab + 1
                )
            }
            TariffError::InvalidSlabTable(msg) => write!(f, "Invalid slab table: {}", msg),
            TariffError::UnknownFuel(name) => write!(f, "Unknown fuel type: {}", name),
            TariffError::FileAccess(e) => write!(f, "Failed to access file: {}", e),
            TariffError::CorruptedConfig(msg) => write!(f, "File is corrupted: {}", msg),
        }
    }
}

impl std::error::Error for TariffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TariffError::FileAccess(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TariffError {
    fn from(error: std::io::Error) -> Self {
        TariffError::FileAccess(error)
    }
}

impl From<serde_json::Error> for TariffError {
    fn from(error: serde_json::Error) -> Self {
        TariffError::CorruptedConfig(format!("JSON error: {}", error))
    }
}

impl From<toml::de::Error> for TariffError {
    fn from(error: toml::de::Error) -> Self {
        TariffError::CorruptedConfig(format!("TOML error: {}", error))
    }
}

/// Reject negative, NaN and infinite amounts before they reach a calculation
pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, TariffError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TariffError::InvalidInput { field, value })
    }
}
