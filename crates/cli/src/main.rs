mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use log::debug;

use crate::cli::{Cli, Commands};
use crate::error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    debug!("parsed arguments: {cli:?}");

    match &cli.command {
        Commands::Solve(args) => commands::solve::run(args),
        Commands::Table(args) => commands::table::run(args),
        Commands::Plot(args) => commands::plot::run(args),
    }
}
