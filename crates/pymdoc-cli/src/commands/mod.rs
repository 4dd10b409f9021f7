//! Command implementations for the pymdoc CLI.
//!
//! pymdoc has a single command, [`generate`], run for every invocation.

pub mod generate;

pub use generate::execute as generate_execute;
