//! FMEA worksheet extractor CLI.

use clap::Parser;
use fmea_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_classify, run_effects, run_parse, run_ratings, run_templates};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: cannot start logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Classify(args) => run_classify(args),
        Command::Templates(args) => run_templates(args),
        Command::Ratings => run_ratings(),
        Command::Effects(args) => run_effects(args),
    };
    let exit_code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Logging follows the global flags; stdout stays reserved for command output.
fn log_config(cli: &Cli) -> LogConfig {
    let verbosity = cli
        .verbosity
        .is_present()
        .then(|| cli.verbosity.tracing_level_filter());
    LogConfig::default()
        .with_cli_levels(verbosity, cli.log_level.map(LevelFilter::from))
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_color(cli.color.color)
}
