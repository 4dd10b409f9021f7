#![deny(clippy::all)]

//! Docstring extraction and Markdown generation for Python modules.
//!
//! This crate provides:
//! - A parser that lowers Python source into a small statement tree using tree-sitter.
//! - An extractor that associates docstrings with functions and assignments.
//! - A call-style signature renderer for documented functions.
//! - Generators for Markdown and JSON output, and a writer for the three output sinks.
//!
//! The input module is only parsed, never executed.

pub mod association;
pub mod docstring;
pub mod error;
pub mod extractor;
pub mod literal;
pub mod model;
pub mod parser;
pub mod signature;

#[cfg(any(feature = "markdown", feature = "json"))]
pub mod generators;

#[cfg(feature = "markdown")]
pub mod writer;

pub use association::{Association, AssociationState};
pub use docstring::clean_docstring;
pub use error::{DocsError, Result, SyntaxError};
pub use extractor::{DocsExtractor, ExtractOptions};
pub use model::{
    AssignTarget, DocRecord, Expr, Extraction, FunctionDef, Node, Parameter, Parameters,
    SourceUnit,
};
pub use parser::parse;
pub use signature::{SignatureStyle, render_expr, render_signature};

#[cfg(feature = "markdown")]
pub use generators::markdown::{render_console, render_single_file, render_symbol};

#[cfg(feature = "json")]
pub use generators::json::render_json;

#[cfg(feature = "markdown")]
pub use writer::{DocsWriter, OutputFormat, OutputMode, WriteReport};
