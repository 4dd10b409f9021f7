//! pymdoc - extract Python docstrings into Markdown.
//!
//! Parses arguments, initializes logging and runs the generate command.

use clap::Parser;
use miette::Result;
use pymdoc_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    commands::generate_execute(&args).map_err(error::cli_error_to_miette)
}
