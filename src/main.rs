//! Nestlint CLI entry point

use clap::Parser;
use nestlint::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use nestlint::cli::{Command, args::Cli};
use nestlint::config::CONFIG_FILE_NAME;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Init { force } => match nestlint::cli::init::run_init(force) {
            Ok(outcome) => {
                println!("{}", outcome.describe(CONFIG_FILE_NAME));
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::Check {
            paths,
            format,
            config,
            verbose,
        } => nestlint::cli::check::run_check(&paths, format, cli.color, &config, verbose),
        Command::List { format, config } => nestlint::cli::list::run_list(format, &config),
    };

    process::exit(exit_code);
}
