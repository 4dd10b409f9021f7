//! Documentation generation for one Python module.

use std::io::Write;
use std::path::Path;

use pymdoc::{DocsExtractor, OutputMode};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::Result;
use crate::ui::{self, Messages};

/// Execute the command against the process working directory and stdout.
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Parse the module and extract its documentation
/// 3. Write to the console, a single file, or one file per symbol
pub fn execute(args: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    let messages = Messages::new(!args.no_color && ui::should_use_color(), args.quiet);
    run(args, &cwd, &mut console, messages)
}

/// Same as [`execute`] with an explicit working directory and console stream.
pub fn run(args: &Cli, cwd: &Path, console: &mut impl Write, messages: Messages) -> Result<()> {
    let settings = Settings::load(args, cwd)?;
    debug!(?settings, "resolved settings");

    let extractor = DocsExtractor::new(settings.extract_options()?);
    let extraction = extractor.extract_from_path(&args.file)?;
    info!(
        file = %args.file.display(),
        records = extraction.records.len(),
        module_doc = extraction.module_doc.is_some(),
        "extracted documentation"
    );
    if extraction.is_empty() {
        messages.warning(&format!("No documentation found in {}", args.file.display()));
    }

    let mode = settings.output_mode();
    let report = settings.writer()?.write_to(&extraction, &mode, console)?;

    match mode {
        OutputMode::Console => {}
        OutputMode::SingleFile(path) => {
            messages.success(&format!("Wrote documentation to {}", path.display()));
        }
        OutputMode::PerSymbol(dir) => {
            let written = report.files.len() - report.overwritten;
            messages.success(&format!(
                "Wrote {} file{} to {}",
                written,
                if written == 1 { "" } else { "s" },
                dir.display()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pymdoc::DocsError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const MODULE: &str = "def foo(a, b=1):\n    \"\"\"Doc A\"\"\"\n\nX = 5\n\"\"\"Doc B\"\"\"\n";

    fn quiet() -> Messages {
        Messages::new(false, true)
    }

    fn project() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("example.py");
        fs::write(&file, MODULE).unwrap();
        (temp, file)
    }

    #[test]
    fn console_output_is_written_to_the_stream() {
        let (temp, file) = project();
        let args = Cli {
            file,
            ..Default::default()
        };
        let mut out = Vec::new();
        run(&args, temp.path(), &mut out, quiet()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("::: foo"));
        assert!(text.contains("Doc B"));
    }

    #[test]
    fn output_file_wins_over_output_path() {
        let (temp, file) = project();
        let docs = temp.path().join("docs");
        fs::create_dir(&docs).unwrap();
        let single = temp.path().join("all.md");
        let args = Cli {
            file,
            output_file: Some(single.clone()),
            output_path: Some(docs.clone()),
            ..Default::default()
        };

        let mut out = Vec::new();
        run(&args, temp.path(), &mut out, quiet()).unwrap();
        assert!(out.is_empty());
        assert!(single.is_file());
        assert_eq!(fs::read_dir(&docs).unwrap().count(), 0);
    }

    #[test]
    fn missing_input_is_a_docs_error() {
        let temp = TempDir::new().unwrap();
        let args = Cli {
            file: temp.path().join("nope.py"),
            ..Default::default()
        };
        let err = run(&args, temp.path(), &mut Vec::new(), quiet()).unwrap_err();
        assert!(matches!(err, CliError::Docs(DocsError::InputNotFound { .. })));
    }
}
