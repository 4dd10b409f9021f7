use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Error variants for documentation extraction and generation.
#[derive(Debug, Error, Diagnostic)]
pub enum DocsError {
    /// The input path does not point at a readable file.
    #[error("input file '{}' does not exist", .path.display())]
    #[diagnostic(
        code(pymdoc::input_not_found),
        help("Pass the path of an existing Python module")
    )]
    InputNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The source could not be parsed into a syntax tree.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    /// Per-symbol output was requested into a directory that does not exist.
    #[error("output directory '{}' does not exist", .path.display())]
    #[diagnostic(
        code(pymdoc::output_directory_not_found),
        help("Create the directory first; pymdoc never creates it")
    )]
    OutputDirectoryNotFound {
        /// Directory that was requested.
        path: PathBuf,
    },

    /// A function node violated the parameter-list contract.
    #[error("cannot render signature of '{function}': {details}")]
    #[diagnostic(code(pymdoc::malformed_signature))]
    MalformedSignature {
        /// Name of the offending function.
        function: String,
        /// What was wrong with the parameter list.
        details: String,
    },

    /// The parser itself failed; this is a defect, not bad input.
    #[error("internal error: {message}")]
    #[diagnostic(
        code(pymdoc::internal),
        help("This is a bug in pymdoc, please report it")
    )]
    Internal {
        /// Description of the failure.
        message: String,
    },

    /// Reading the source or writing output failed.
    #[error("i/o error on '{}': {error}", .path.display())]
    #[diagnostic(code(pymdoc::io))]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },
}

impl DocsError {
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }

    pub fn malformed_signature(function: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedSignature {
            function: function.into(),
            details: details.into(),
        }
    }
}

/// Parser diagnostic pointing at the offending region of the source.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid syntax in '{}' at line {line}, column {column}: {message}", .path.display())]
#[diagnostic(code(pymdoc::syntax))]
pub struct SyntaxError {
    /// File that failed to parse.
    pub path: PathBuf,
    /// Parser message.
    pub message: String,
    /// One-based line of the error.
    pub line: usize,
    /// One-based column of the error.
    pub column: usize,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("{message}")]
    pub span: SourceSpan,
}

impl SyntaxError {
    /// Build a syntax error for the byte range `start..end` of `source`.
    pub fn new(
        path: impl Into<PathBuf>,
        source: &str,
        message: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        let path = path.into();
        let start = char_boundary(source, start);
        let end = char_boundary(source, end.max(start));
        let (line, column) = line_column(source, start);
        Self {
            source_code: NamedSource::new(path.display().to_string(), source.to_string()),
            path,
            message: message.into(),
            line,
            column,
            span: (start, end - start).into(),
        }
    }
}

fn char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
