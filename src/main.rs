use yaml_shellcheck::cli::{resolve_config, run, CliArgs};
use yaml_shellcheck::util::{init_logging, LoggingConfig};
use yaml_shellcheck::{ShellcheckConfig, VERSION};

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let config = resolve_config(&args, ShellcheckConfig::default());

    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.debug,
        args.quiet,
        &config.log_level,
    ));

    debug!("yaml-shellcheck v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("{}", config);

    std::process::exit(run(&args, &config));
}
