use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for rendered documentation
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Markdown blocks with fenced signatures
    #[default]
    #[value(name = "markdown")]
    Markdown,

    /// The extraction as pretty-printed JSON
    ///
    /// Not available for per-symbol output.
    #[value(name = "json")]
    Json,
}
