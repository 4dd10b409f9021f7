use std::ops::RangeInclusive;

use pymdoc::{DocsWriter, ExtractOptions, OutputFormat, OutputMode, SignatureStyle};
use regex::Regex;
use tracing::warn;

use crate::cli::{Format, parse_extension};
use crate::config::Settings;
use crate::error::{ConfigError, Result};

const INDENT_RANGE: RangeInclusive<usize> = 1..=16;

impl Settings {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if !INDENT_RANGE.contains(&self.indent) {
            return Err(ConfigError::InvalidValue {
                field: "indent".to_string(),
                value: self.indent.to_string(),
                hint: format!(
                    "Must be between {} and {}",
                    INDENT_RANGE.start(),
                    INDENT_RANGE.end()
                ),
            }
            .into());
        }

        if let Err(hint) = parse_extension(&self.extension) {
            return Err(ConfigError::InvalidValue {
                field: "extension".to_string(),
                value: self.extension.clone(),
                hint,
            }
            .into());
        }

        if self.fence_language.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "fence_language".to_string(),
                value: self.fence_language.clone(),
                hint: "Fence info strings cannot contain whitespace".to_string(),
            }
            .into());
        }

        self.compiled_filter()?;

        if self.format == Format::Json && self.output_file.is_none() && self.output_path.is_some() {
            return Err(ConfigError::ConflictingOptions(
                "JSON output cannot be split into per-symbol files".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Compiled `filter`, if any.
    pub fn compiled_filter(&self) -> Result<Option<Regex>> {
        let Some(pattern) = self.filter.as_deref() else {
            return Ok(None);
        };
        match Regex::new(pattern) {
            Ok(regex) => Ok(Some(regex)),
            Err(e) => Err(ConfigError::InvalidValue {
                field: "filter".to_string(),
                value: pattern.to_string(),
                hint: e.to_string(),
            }
            .into()),
        }
    }

    /// Options for the extractor.
    pub fn extract_options(&self) -> Result<ExtractOptions> {
        Ok(ExtractOptions {
            signatures: self.signatures,
            style: SignatureStyle {
                indent: self.indent,
                fence_language: self.fence_language.clone(),
            },
            filter: self.compiled_filter()?,
        })
    }

    /// Where output goes. The single file wins over the per-symbol directory.
    pub fn output_mode(&self) -> OutputMode {
        match (&self.output_file, &self.output_path) {
            (Some(file), Some(dir)) => {
                warn!(
                    file = %file.display(),
                    dir = %dir.display(),
                    "both an output file and an output path were given; writing the single file"
                );
                OutputMode::SingleFile(file.clone())
            }
            (Some(file), None) => OutputMode::SingleFile(file.clone()),
            (None, Some(dir)) => OutputMode::PerSymbol(dir.clone()),
            (None, None) => OutputMode::Console,
        }
    }

    /// Writer configured with the extension and output format.
    pub fn writer(&self) -> Result<DocsWriter> {
        Ok(DocsWriter::new(self.extension.clone(), self.output_format()?))
    }

    fn output_format(&self) -> Result<OutputFormat> {
        match self.format {
            Format::Markdown => Ok(OutputFormat::Markdown),
            #[cfg(feature = "json")]
            Format::Json => Ok(OutputFormat::Json),
            #[cfg(not(feature = "json"))]
            Format::Json => Err(ConfigError::InvalidValue {
                field: "format".to_string(),
                value: "json".to_string(),
                hint: "This build of pymdoc was compiled without JSON support".to_string(),
            }
            .into()),
        }
    }
}
