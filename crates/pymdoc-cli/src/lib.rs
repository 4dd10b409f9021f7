//! pymdoc CLI - Python docstrings to Markdown.
//!
//! This crate provides the command-line interface on top of the `pymdoc`
//! library: argument parsing, layered configuration, logging and error
//! reporting.
//!
//! - [`cli`] - clap argument surface
//! - [`config`] - `pymdoc.toml` / `PYMDOC_*` / CLI settings
//! - [`commands`] - the generate command
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing setup
//! - [`ui`] - status messages on stderr

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
