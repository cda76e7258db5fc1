pub mod app_config;
pub mod config_error;
pub mod log_destination;

pub use app_config::*;
pub use config_error::ConfigError;
pub use log_destination::LogDestination;
