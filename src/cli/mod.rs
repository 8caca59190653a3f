pub mod commands;
pub mod handlers;

pub use commands::CliArgs;
pub use handlers::{resolve_config, run, FATAL_EXIT_CODE};
