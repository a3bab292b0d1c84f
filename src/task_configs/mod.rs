// Inner modules
mod errors;
mod generator;
mod memory;
mod service;

// Exports
pub use errors::{ConfigError, ConfigResult};
pub use generator::generate_task_configs;
pub use memory::MemoryConfigManagementService;
pub use service::ConfigManagementService;
