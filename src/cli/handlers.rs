use super::commands::CliArgs;
use crate::checker::Checker;
use crate::config::ShellcheckConfig;
use crate::fs::RealFileSystem;
use crate::pipeline::Pipeline;
use crate::progress::LoggingHandler;
use crate::sandbox::Workdir;
use anyhow::{Context, Result};
use tracing::{debug, error, info};

/// Exit code for invalid configuration and other fatal errors
pub const FATAL_EXIT_CODE: i32 = 1;

/// Applies command line overrides on top of the environment configuration
pub fn resolve_config(args: &CliArgs, base: ShellcheckConfig) -> ShellcheckConfig {
    ShellcheckConfig {
        default_shell: args.shell.clone().unwrap_or(base.default_shell),
        command: args.command.clone().unwrap_or(base.command),
        outdir: args.outdir.clone().or(base.outdir),
        keep: args.keep || base.keep,
        log_level: args
            .log_level
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or(base.log_level),
    }
}

/// Runs extraction and the checker; returns the process exit code
pub fn run(args: &CliArgs, config: &ShellcheckConfig) -> i32 {
    if let Err(e) = config.validate() {
        error!("{}", e);
        return FATAL_EXIT_CODE;
    }

    match check(args, config) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            FATAL_EXIT_CODE
        }
    }
}

fn check(args: &CliArgs, config: &ShellcheckConfig) -> Result<i32> {
    let checker = Checker::from_command_line(&config.command)?;
    debug!(
        program = checker.program(),
        args = ?checker.args(),
        "resolved checker command"
    );
    let workdir = Workdir::create(config.outdir.as_deref())?;

    let fs = RealFileSystem::new();
    let progress = LoggingHandler;
    let pipeline = Pipeline::new(&fs, &progress, workdir.path(), &config.default_shell);

    let outcome = pipeline
        .run(&args.files)
        .context("Failed to write extracted scripts")
        .and_then(|files| {
            if files.is_empty() {
                info!("No scripts found, nothing to check");
                Ok(0)
            } else {
                checker.run(workdir.path(), &files)
            }
        });

    let finished = workdir.finish(config.keep);
    let code = outcome?;
    finished?;
    Ok(code)
}
