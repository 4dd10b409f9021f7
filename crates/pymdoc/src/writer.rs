//! Dispatch of rendered documentation to its sink.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{DocsError, Result};
use crate::generators::markdown::{render_console, render_single_file, render_symbol, symbol_file_name};
use crate::model::Extraction;

const STDOUT: &str = "<stdout>";

/// Where documentation is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Banner-separated blocks on the console stream.
    Console,
    /// Every block concatenated into one file.
    SingleFile(PathBuf),
    /// One file per record inside an existing directory.
    PerSymbol(PathBuf),
}

/// Serialization used for the console and single-file sinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    #[cfg(feature = "json")]
    Json,
}

/// Files produced by a write.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Paths written, in write order. Empty for console output.
    pub files: Vec<PathBuf>,
    /// Records whose file was overwritten by a later record of the same name.
    pub overwritten: usize,
}

/// Writes an [`Extraction`] to the console, one file or a directory.
#[derive(Debug, Clone)]
pub struct DocsWriter {
    extension: String,
    format: OutputFormat,
}

impl Default for DocsWriter {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            format: OutputFormat::default(),
        }
    }
}

impl DocsWriter {
    pub fn new(extension: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            extension: extension.into(),
            format,
        }
    }

    /// Write to `mode`, using stdout for [`OutputMode::Console`].
    pub fn write(&self, extraction: &Extraction, mode: &OutputMode) -> Result<WriteReport> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_to(extraction, mode, &mut lock)
    }

    /// Write to `mode`, sending console output to `console`.
    pub fn write_to(
        &self,
        extraction: &Extraction,
        mode: &OutputMode,
        console: &mut impl Write,
    ) -> Result<WriteReport> {
        match mode {
            OutputMode::Console => {
                let text = self.render_document(extraction, render_console)?;
                console
                    .write_all(text.as_bytes())
                    .and_then(|()| console.flush())
                    .map_err(|error| DocsError::io(STDOUT, error))?;
                Ok(WriteReport::default())
            }
            OutputMode::SingleFile(path) => {
                let text = self.render_document(extraction, render_single_file)?;
                write_file(path, &text)?;
                info!(path = %path.display(), records = extraction.records.len(), "wrote documentation");
                Ok(WriteReport {
                    files: vec![path.clone()],
                    overwritten: 0,
                })
            }
            OutputMode::PerSymbol(dir) => self.write_per_symbol(extraction, dir),
        }
    }

    fn render_document(
        &self,
        extraction: &Extraction,
        markdown: fn(&Extraction) -> String,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Markdown => Ok(markdown(extraction)),
            #[cfg(feature = "json")]
            OutputFormat::Json => crate::generators::json::render_json(extraction),
        }
    }

    fn write_per_symbol(&self, extraction: &Extraction, dir: &Path) -> Result<WriteReport> {
        if !dir.is_dir() {
            return Err(DocsError::OutputDirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut report = WriteReport::default();
        let mut written = HashSet::new();
        for record in &extraction.records {
            let path = dir.join(symbol_file_name(&record.symbol_name, &self.extension));
            if !written.insert(path.clone()) {
                warn!(
                    symbol = %record.symbol_name,
                    path = %path.display(),
                    "duplicate symbol, overwriting earlier documentation"
                );
                report.overwritten += 1;
            }
            write_file(&path, &render_symbol(record))?;
            debug!(symbol = %record.symbol_name, path = %path.display(), "wrote symbol");
            report.files.push(path);
        }

        info!(dir = %dir.display(), files = written.len(), "wrote per-symbol documentation");
        Ok(report)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|error| DocsError::io(path, error))
}
