pub mod calculator;
pub mod error;
pub mod fuel;
pub mod tariffs;
pub mod types;

pub use error::TariffError;
pub use fuel::{aggregate_fuel, FuelPrice, FuelPriceTable, FuelResult};
pub use tariffs::TariffTable;
pub use types::{
    CostComparison, InputMode, Schedule, SlabRule, TariffResult, UsageAllocation, Utility,
};
