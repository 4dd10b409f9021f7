//! Error handling for the pymdoc CLI.
//!
//! Library failures arrive as [`pymdoc::DocsError`] and keep their
//! diagnostic (source snippet, help text) all the way to the terminal.
//! Configuration problems get their own [`ConfigError`] with a hint.
//!
//! # Example
//!
//! ```rust,no_run
//! use pymdoc_cli::error::Result;
//! use std::path::Path;
//!
//! fn read_module(path: &Path) -> Result<String> {
//!     Ok(std::fs::read_to_string(path)?)
//! }
//! ```

pub mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Extraction or output failure reported by the library
    #[error(transparent)]
    Docs(#[from] pymdoc::DocsError),

    /// Configuration-related errors (unreadable file, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file passed with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a pymdoc.toml file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Config sources could not be merged into settings
    #[error("{message}\n\nHint: Check pymdoc.toml syntax and PYMDOC_* environment variables")]
    Invalid {
        /// Message reported by the configuration loader
        message: String,
    },

    /// Mutually exclusive options were specified
    #[error("Conflicting options: {0}\n\nHint: These options cannot be used together")]
    ConflictingOptions(String),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("custom.toml"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("custom.toml"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "indent".to_string(),
            value: "0".to_string(),
            hint: "Must be between 1 and 16".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'indent'"));
        assert!(msg.contains("Must be between 1 and 16"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::ConflictingOptions("a and b".to_string());
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
    }

    #[test]
    fn test_cli_error_from_docs_error_is_transparent() {
        let docs_err = pymdoc::DocsError::InputNotFound {
            path: PathBuf::from("missing.py"),
        };
        let expected = docs_err.to_string();
        let cli_err: CliError = docs_err.into();
        assert!(matches!(cli_err, CliError::Docs(_)));
        assert_eq!(cli_err.to_string(), expected);
    }

    #[test]
    fn test_cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
        assert!(cli_err.to_string().starts_with("I/O error: "));
    }
}
