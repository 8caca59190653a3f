//! Running the external shell checker over the sandbox

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Exit code reported when the checker ends without one
const SIGNAL_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checker {
    program: String,
    args: Vec<String>,
}

impl Checker {
    /// Parses a command line such as `shellcheck --severity=warning`
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = shell_words::split(command_line)
            .with_context(|| format!("Failed to parse checker command: {}", command_line))?
            .into_iter();

        let Some(program) = parts.next() else {
            bail!("Empty checker command");
        };

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs the checker in `cwd` with the relative script paths appended
    ///
    /// Output is passed through. Returns the checker's exit code.
    pub fn run(&self, cwd: &Path, files: &[PathBuf]) -> Result<i32> {
        debug!(
            "Running {} {} on {} file(s) in {}",
            self.program,
            shell_words::join(&self.args),
            files.len(),
            cwd.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .args(files)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to run checker {}", self.program))?;

        match status.code() {
            Some(code) => {
                debug!("{} exited with {}", self.program, code);
                Ok(code)
            }
            None => {
                warn!("{} was terminated by a signal", self.program);
                Ok(SIGNAL_EXIT_CODE)
            }
        }
    }
}
