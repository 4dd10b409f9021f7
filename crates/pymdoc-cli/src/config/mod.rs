//! Configuration for pymdoc with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and `pymdoc.toml`.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod tests;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Format;

pub use defaults::*;
pub use loading::CONFIG_FILE_NAME;

/// Resolved pymdoc settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Single-file output target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,

    /// Per-symbol output directory (must exist)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Extension of per-symbol files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Spaces before each signature parameter
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Info string of the signature code fence
    #[serde(default = "default_fence_language")]
    pub fence_language: String,

    /// Render function signatures
    #[serde(default = "default_signatures")]
    pub signatures: bool,

    /// Regular expression symbol names must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Console and single-file output format
    #[serde(default)]
    pub format: Format,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_file: None,
            output_path: None,
            extension: default_extension(),
            indent: default_indent(),
            fence_language: default_fence_language(),
            signatures: default_signatures(),
            filter: None,
            format: Format::default(),
        }
    }
}
