//! Command-line interface definition for pymdoc.
//!
//! `pymdoc [OPTIONS] <FILE>` extracts the docstrings of one Python module and
//! prints them as Markdown, or writes them to a single file (`-o`) or to one
//! file per symbol (`-p`).

pub mod enums;
mod validation;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub use enums::Format;
pub use validation::{parse_extension, parse_filter};

/// pymdoc - Python docstrings to Markdown
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "pymdoc",
    version,
    about = "Extract Python docstrings into Markdown",
    long_about = "pymdoc reads a single Python module without executing it and collects the\n\
                  docstrings of its functions, documented assignments and the module itself.\n\
                  Output goes to stdout by default, to one Markdown file with -o, or to one\n\
                  file per symbol with -p."
)]
pub struct Cli {
    /// Python source file to document
    pub file: PathBuf,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write all documentation into this file
    ///
    /// Takes precedence over --output-path when both are given.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Write one file per documented symbol into this existing directory
    #[arg(short = 'p', long, value_name = "DIR")]
    pub output_path: Option<PathBuf>,

    /// Only keep symbols whose name matches this regular expression
    #[arg(long, value_name = "REGEX", value_parser = parse_filter)]
    pub filter: Option<String>,

    /// Do not render function signatures
    #[arg(long)]
    pub no_signatures: bool,

    /// File extension for per-symbol output (without the dot)
    #[arg(long, value_name = "EXT", value_parser = parse_extension)]
    pub extension: Option<String>,

    /// Output format for the console and single-file sinks
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Path to a configuration file (defaults to ./pymdoc.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
