use serde::{Deserialize, Serialize};

/// Utility whose tariff is being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Utility {
    Electricity,
    Water,
    Fuel,
}

impl Utility {
    /// Unit of consumption shown next to usage figures
    pub fn unit(&self) -> &'static str {
        match self {
            Utility::Electricity => "kWh",
            Utility::Water => "m³",
            Utility::Fuel => "liters",
        }
    }
}

/// Which pricing regime to apply to an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    Old,
    New,
}

/// One consumption bracket of a tiered tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabRule {
    /// Units this slab absorbs beyond the slabs before it. `None` = unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    pub old_unit_price: f64,
    pub new_unit_price: f64,
}

impl SlabRule {
    pub fn limited(capacity: f64, old_unit_price: f64, new_unit_price: f64) -> Self {
        Self {
            capacity: Some(capacity),
            old_unit_price,
            new_unit_price,
        }
    }

    pub fn unbounded(old_unit_price: f64, new_unit_price: f64) -> Self {
        Self {
            capacity: None,
            old_unit_price,
            new_unit_price,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.capacity.is_none()
    }

    /// Unit price under the given schedule
    pub fn price(&self, schedule: Schedule) -> f64 {
        match schedule {
            Schedule::Old => self.old_unit_price,
            Schedule::New => self.new_unit_price,
        }
    }
}

/// Per-slab split of a total consumption, one entry per slab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageAllocation(Vec<f64>);

impl UsageAllocation {
    pub fn new(per_slab: Vec<f64>) -> Self {
        Self(per_slab)
    }

    /// All-zero allocation for a table with `slab_count` slabs
    pub fn zeroed(slab_count: usize) -> Self {
        Self(vec![0.0; slab_count])
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Old vs new cost delta
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    pub old_cost: f64,
    pub new_cost: f64,
    pub difference: f64,
    /// 0 when there is no old cost to compare against
    pub percent_change: f64,
}

impl CostComparison {
    /// Whether the old cost was positive, i.e. the percentage is meaningful
    pub fn has_baseline(&self) -> bool {
        self.old_cost > 0.0
    }
}

/// Full breakdown returned for one slab-tariff calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffResult {
    pub allocation: UsageAllocation,
    pub old_cost: f64,
    pub new_cost: f64,
    pub difference: f64,
    pub percent_change: f64,
    pub total_usage: f64,
}

impl TariffResult {
    /// Zero result used when the input could not be computed
    pub fn empty(slab_count: usize) -> Self {
        Self {
            allocation: UsageAllocation::zeroed(slab_count),
            old_cost: 0.0,
            new_cost: 0.0,
            difference: 0.0,
            percent_change: 0.0,
            total_usage: 0.0,
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

/// What the user typed: a consumption figure or a previous bill amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum InputMode {
    Usage(f64),
    Bill(f64),
}

impl InputMode {
    /// Resolve the two form fields into a mode.
    ///
    /// A bill is only used when it is positive and no usage was entered,
    /// otherwise the usage field wins (even when both are zero).
    pub fn from_form(bill: f64, usage: f64) -> Self {
        if bill > 0.0 && usage == 0.0 {
            InputMode::Bill(bill)
        } else {
            InputMode::Usage(usage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_price_by_schedule() {
        let slab = SlabRule::unbounded(0.016, 0.032);
        assert_eq!(slab.price(Schedule::Old), 0.016);
        assert_eq!(slab.price(Schedule::New), 0.032);
        assert!(slab.is_unbounded());
        assert!(!SlabRule::limited(3000.0, 0.003, 0.003).is_unbounded());
    }

    #[test]
    fn test_input_mode_from_form() {
        assert_eq!(InputMode::from_form(5.0, 0.0), InputMode::Bill(5.0));
        assert_eq!(InputMode::from_form(5.0, 120.0), InputMode::Usage(120.0));
        assert_eq!(InputMode::from_form(0.0, 0.0), InputMode::Usage(0.0));
        assert_eq!(InputMode::from_form(0.0, 42.0), InputMode::Usage(42.0));
    }

    #[test]
    fn test_empty_result() {
        let result = TariffResult::empty(3);
        assert_eq!(result.allocation.as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(result.total_usage, 0.0);
        assert!(!result.comparison().has_baseline());
    }

    #[test]
    fn test_unbounded_capacity_omitted_in_toml() {
        let slab = SlabRule::unbounded(0.2, 0.775);
        let text = toml::to_string(&slab).unwrap();
        assert!(!text.contains("capacity"));

        let parsed: SlabRule = toml::from_str(&text).unwrap();
        assert_eq!(parsed, slab);
    }
}
