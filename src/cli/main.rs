//! Command-line interface entry point for `StudyPlanner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;
use study_planner::config::Config;
use study_planner::info;
use study_planner::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

/// Apply log level, verbosity and file sink. Returns whether verbose output is on.
///
/// Precedence: CLI flags, then the loaded config, then `warn`.
fn init_logging(args: &Cli, config: &Config) -> bool {
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    set_level(level);

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }

    let log_path = args.log_file.clone().or_else(|| {
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file))
    });
    if let Some(log_path) = log_path {
        let display_path = log_path.to_string_lossy();
        if !init_file_logging(&log_path) {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        } else if verbose {
            eprintln!("✓ File logging initialized at: {display_path}");
        } else {
            info!("File logging initialized at: {display_path}");
        }
    }
    verbose
}

fn main() {
    let args = Cli::parse();

    // Overrides apply to this run only; the config file is untouched
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    let verbose = init_logging(&args, &config);

    let exit_code = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Sample { output } => commands::sample::run(output.as_deref(), &config),
        Command::Check { form } => commands::check::run(&form, &config, verbose),
        Command::Submit {
            form,
            output,
            format,
        } => commands::submit::run(&form, output.as_deref(), format, &config, verbose),
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
