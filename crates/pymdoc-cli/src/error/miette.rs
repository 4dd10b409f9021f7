//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use pymdoc::DocsError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Docs(e) => docs_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a library error to a Report, keeping its diagnostic metadata.
pub fn docs_error_to_miette(err: DocsError) -> Report {
    match err {
        DocsError::Internal { .. } | DocsError::MalformedSignature { .. } => {
            Report::new(err).wrap_err("pymdoc hit an unexpected state; please file a bug report")
        }
        _ => Report::new(err),
    }
}
