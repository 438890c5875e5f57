pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::DEFAULT_BAR_WIDTH;
pub use loader::ConfigLoader;
pub use types::*;
