//! Utility modules for yaml-shellcheck

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
