use crate::docstring::with_single_trailing_newline;
use crate::model::{DocRecord, Extraction};

const BANNER_WIDTH: usize = 60;

/// Console banner introducing one documented symbol.
pub fn banner(name: &str) -> String {
    let rule = ":".repeat(BANNER_WIDTH);
    format!("{rule}\n::: {name}\n{rule}\n")
}

/// Render the whole extraction for the terminal: module documentation first,
/// then every record, each introduced by a [`banner`].
pub fn render_console(extraction: &Extraction) -> String {
    let mut output = String::new();

    if let Some(module_doc) = &extraction.module_doc {
        output.push_str(&banner(&extraction.module_name));
        output.push_str(&with_single_trailing_newline(module_doc));
    }

    for record in &extraction.records {
        output.push_str(&banner(&record.symbol_name));
        output.push_str(&render_symbol(record));
    }

    output
}

/// Render every block into one Markdown document.
///
/// Module documentation comes first and records follow in source order.
/// Blocks are joined with one blank line rather than run together, so each
/// docstring stays its own Markdown paragraph.
pub fn render_single_file(extraction: &Extraction) -> String {
    let mut blocks = Vec::with_capacity(extraction.records.len() + 1);
    if let Some(module_doc) = &extraction.module_doc {
        blocks.push(with_single_trailing_newline(module_doc));
    }
    blocks.extend(extraction.records.iter().map(render_symbol));
    blocks.join("\n")
}

/// Signature (if any), a blank line, then the documentation; always ends
/// with exactly one newline.
pub fn render_symbol(record: &DocRecord) -> String {
    let mut output = String::new();
    if let Some(signature) = &record.signature {
        output.push_str(signature.trim_end());
        output.push_str("\n\n");
    }
    output.push_str(&with_single_trailing_newline(&record.documentation));
    output
}

/// File name for a symbol in per-symbol mode: underscores become hyphens.
pub fn symbol_file_name(symbol_name: &str, extension: &str) -> String {
    format!("{}.{extension}", symbol_name.replace('_', "-"))
}
