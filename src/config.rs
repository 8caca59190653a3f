//! Configuration for yaml-shellcheck
//!
//! Settings are loaded from environment variables with built-in defaults;
//! command line flags override them.
//!
//! # Environment Variables
//!
//! - `YAML_SHELLCHECK_SHELL`: default shebang for scripts without one - default: "#!/bin/sh -e"
//! - `YAML_SHELLCHECK_COMMAND`: checker command line - default: "shellcheck"
//! - `YAML_SHELLCHECK_OUTDIR`: output directory - default: a new temporary directory
//! - `YAML_SHELLCHECK_KEEP`: keep the output directory (true|false) - default: "false"
//! - `YAML_SHELLCHECK_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use yaml_shellcheck::ShellcheckConfig;
//!
//! let config = ShellcheckConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SHELL: &str = "#!/bin/sh -e";
pub const DEFAULT_COMMAND: &str = "shellcheck";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_KEEP: bool = false;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Default shell must start with '#!': {0}")]
    InvalidShell(String),

    #[error("Checker command is empty")]
    EmptyCommand,

    #[error("Failed to parse checker command {command}: {error}")]
    InvalidCommand { command: String, error: String },

    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellcheckConfig {
    /// Shebang line written ahead of scripts that have none
    pub default_shell: String,

    /// Checker command line, split with shell quoting rules
    pub command: String,

    /// Output directory; a temporary directory is used when unset
    pub outdir: Option<PathBuf>,

    /// Keep the output directory after the checker ran
    pub keep: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ShellcheckConfig {
    /// Loads YAML_SHELLCHECK_* environment variables, falling back to defaults
    fn default() -> Self {
        let default_shell =
            env::var("YAML_SHELLCHECK_SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string());

        let command =
            env::var("YAML_SHELLCHECK_COMMAND").unwrap_or_else(|_| DEFAULT_COMMAND.to_string());

        let outdir = env::var("YAML_SHELLCHECK_OUTDIR")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let keep = env::var("YAML_SHELLCHECK_KEEP")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_KEEP);

        let log_level = env::var("YAML_SHELLCHECK_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            default_shell,
            command,
            outdir,
            keep,
            log_level,
        }
    }
}

impl ShellcheckConfig {
    /// Checks the shebang, the checker command line and the log level
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_shell.starts_with("#!") {
            return Err(ConfigError::InvalidShell(self.default_shell.clone()));
        }

        match shell_words::split(&self.command) {
            Ok(parts) if parts.is_empty() => return Err(ConfigError::EmptyCommand),
            Ok(_) => {}
            Err(e) => {
                return Err(ConfigError::InvalidCommand {
                    command: self.command.clone(),
                    error: e.to_string(),
                })
            }
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for ShellcheckConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "yaml-shellcheck configuration:")?;
        writeln!(f, "  Default shell: {}", self.default_shell)?;
        writeln!(f, "  Command: {}", self.command)?;
        match &self.outdir {
            Some(dir) => writeln!(f, "  Output dir: {}", dir.display())?,
            None => writeln!(f, "  Output dir: <temporary>")?,
        }
        writeln!(f, "  Keep: {}", self.keep)?;
        writeln!(f, "  Log level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "YAML_SHELLCHECK_SHELL",
        "YAML_SHELLCHECK_COMMAND",
        "YAML_SHELLCHECK_OUTDIR",
        "YAML_SHELLCHECK_KEEP",
        "YAML_SHELLCHECK_LOG_LEVEL",
    ];

    /// Restores an environment variable when dropped
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn remove(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn clear_env() -> Vec<EnvGuard> {
        VARS.iter().map(|key| EnvGuard::remove(key)).collect()
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = clear_env();

        let config = ShellcheckConfig::default();
        assert_eq!(config.default_shell, DEFAULT_SHELL);
        assert_eq!(config.command, DEFAULT_COMMAND);
        assert_eq!(config.outdir, None);
        assert!(!config.keep);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _cleared = clear_env();
        let _guards = vec![
            EnvGuard::set("YAML_SHELLCHECK_SHELL", "#!/bin/bash"),
            EnvGuard::set("YAML_SHELLCHECK_COMMAND", "shellcheck -S warning"),
            EnvGuard::set("YAML_SHELLCHECK_OUTDIR", "/tmp/scripts"),
            EnvGuard::set("YAML_SHELLCHECK_KEEP", "true"),
            EnvGuard::set("YAML_SHELLCHECK_LOG_LEVEL", "DEBUG"),
        ];

        let config = ShellcheckConfig::default();
        assert_eq!(config.default_shell, "#!/bin/bash");
        assert_eq!(config.command, "shellcheck -S warning");
        assert_eq!(config.outdir, Some(PathBuf::from("/tmp/scripts")));
        assert!(config.keep);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_unparsable_keep_uses_default() {
        let _cleared = clear_env();
        let _guard = EnvGuard::set("YAML_SHELLCHECK_KEEP", "yes please");

        assert!(!ShellcheckConfig::default().keep);
    }

    #[test]
    #[serial]
    fn test_validation_errors() {
        let _cleared = clear_env();
        let base = ShellcheckConfig::default();

        let config = ShellcheckConfig {
            default_shell: "/bin/sh".to_string(),
            ..base.clone()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidShell("/bin/sh".to_string()))
        );

        let config = ShellcheckConfig {
            command: "  ".to_string(),
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyCommand));

        let config = ShellcheckConfig {
            command: "shellcheck \"unterminated".to_string(),
            ..base.clone()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCommand { .. })
        ));

        let config = ShellcheckConfig {
            log_level: "loud".to_string(),
            ..base
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel("loud".to_string()))
        );
    }

    #[test]
    #[serial]
    fn test_display() {
        let _cleared = clear_env();
        let output = ShellcheckConfig::default().to_string();
        assert!(output.contains("Command: shellcheck"));
        assert!(output.contains("Output dir: <temporary>"));
    }
}
