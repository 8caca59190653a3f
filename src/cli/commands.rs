use clap::Parser;
use std::path::PathBuf;

/// Check shell scripts embedded in CI configuration files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "yaml-shellcheck",
    about = "Check shell scripts embedded in CI configuration files",
    version,
    long_about = "yaml-shellcheck extracts the shell scripts of Bitbucket Pipelines, GitHub \
                  Actions, CircleCI, Drone CI, Ansible and GitLab CI files into a directory \
                  of plain script files and runs shellcheck over them.\n\n\
                  Examples:\n  \
                  yaml-shellcheck .gitlab-ci.yml\n  \
                  yaml-shellcheck -k -o scripts .github/workflows/*.yml\n  \
                  yaml-shellcheck -c 'shellcheck --severity=warning' playbook.yml"
)]
pub struct CliArgs {
    #[arg(value_name = "FILES", required = true, help = "YAML files to read")]
    pub files: Vec<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Output directory (default: a new temporary directory)"
    )]
    pub outdir: Option<PathBuf>,

    #[arg(short = 'k', long, help = "Keep the output directory")]
    pub keep: bool,

    #[arg(
        short = 's',
        long,
        value_name = "SHEBANG",
        help = "Default shebang for scripts without one (default: \"#!/bin/sh -e\")"
    )]
    pub shell: Option<String>,

    #[arg(
        short = 'c',
        long,
        value_name = "CMD",
        help = "Checker command line (default: \"shellcheck\")"
    )]
    pub command: Option<String>,

    #[arg(short = 'd', long, help = "Debug output")]
    pub debug: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "debug",
        help = "Quiet mode - only errors"
    )]
    pub quiet: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,
}
