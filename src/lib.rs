// hostalert Library - Public API

// Re-export error types
pub mod error;
pub use error::{HostAlertError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;

// Re-export commonly used types
pub use crate::core::config::{MonitorConfig, Target};
pub use crate::core::monitor::{Monitor, RunOptions, RunReport};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
