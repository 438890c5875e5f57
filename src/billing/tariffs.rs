use serde::{Deserialize, Serialize};

use super::calculator::validate_slabs;
use super::error::TariffError;
use super::{SlabRule, Utility};

/// A slab tariff for one utility together with how it is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffTable {
    pub utility: Utility,
    /// Hex colour per slab for the usage bar, e.g. "#27ae60"
    #[serde(default)]
    pub colors: Vec<String>,
    pub slabs: Vec<SlabRule>,
}

impl TariffTable {
    /// EWA residential electricity tariff (BHD per kWh)
    pub fn electricity() -> Self {
        Self {
            utility: Utility::Electricity,
            slabs: vec![
                SlabRule::limited(3000.0, 0.003, 0.003),
                SlabRule::limited(2000.0, 0.009, 0.009),
                SlabRule::unbounded(0.016, 0.032),
            ],
            colors: vec![
                "#27ae60".to_string(),
                "#f1c40f".to_string(),
                "#e74c3c".to_string(),
            ],
        }
    }

    /// EWA residential water tariff (BHD per m³)
    pub fn water() -> Self {
        Self {
            utility: Utility::Water,
            slabs: vec![
                SlabRule::limited(60.0, 0.025, 0.025),
                SlabRule::limited(40.0, 0.08, 0.08),
                SlabRule::unbounded(0.2, 0.775),
            ],
            colors: vec![
                "#3498db".to_string(),
                "#f1c40f".to_string(),
                "#e74c3c".to_string(),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), TariffError> {
        if self.utility == Utility::Fuel {
            return Err(TariffError::InvalidSlabTable(
                "fuel is priced per litre, not by slabs".to_string(),
            ));
        }
        validate_slabs(&self.slabs)?;

        for color in &self.colors {
            if !is_hex_color(color) {
                return Err(TariffError::CorruptedConfig(format!(
                    "{:?} colour '{}' is not a #rrggbb value",
                    self.utility, color
                )));
            }
        }
        Ok(())
    }

    /// Colour for slab `index`, cycling when fewer colours than slabs are configured
    pub fn color_for(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return "#808080";
        }
        &self.colors[index % self.colors.len()]
    }
}

fn is_hex_color(value: &str) -> bool {
    let hex = value.trim().trim_start_matches('#');
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
