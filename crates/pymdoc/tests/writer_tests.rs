#![cfg(feature = "markdown")]
use std::fs;

use pymdoc::{DocsError, DocsExtractor, DocsWriter, OutputMode};
use tempfile::TempDir;

const SOURCE: &str = r#""""Utilities."""

def my_func(a, b=1):
    """Doc A"""

X = 5
"""Doc B"""
"#;

fn extraction() -> pymdoc::Extraction {
    DocsExtractor::default()
        .extract_from_source("utils.py", SOURCE)
        .unwrap()
}

#[test]
fn single_file_keeps_source_order() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.md");
    let report = DocsWriter::default()
        .write_to(&extraction(), &OutputMode::SingleFile(out.clone()), &mut Vec::new())
        .unwrap();

    assert_eq!(report.files, vec![out.clone()]);
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Utilities.\n\n```python\nmy_func(\n    a,\n    b=1\n)\n```\n\nDoc A\n\nDoc B\n"
    );
}

#[test]
fn per_symbol_writes_one_file_per_record() {
    let dir = TempDir::new().unwrap();
    DocsWriter::default()
        .write_to(&extraction(), &OutputMode::PerSymbol(dir.path().to_path_buf()), &mut Vec::new())
        .unwrap();

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["X.md", "my-func.md"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("my-func.md")).unwrap(),
        "```python\nmy_func(\n    a,\n    b=1\n)\n```\n\nDoc A\n"
    );
}

#[test]
fn per_symbol_into_missing_directory_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = DocsWriter::default()
        .write_to(&extraction(), &OutputMode::PerSymbol(missing.clone()), &mut Vec::new())
        .unwrap_err();

    assert!(matches!(err, DocsError::OutputDirectoryNotFound { .. }));
    assert!(!missing.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn console_lists_module_doc_under_module_name() {
    let mut buffer = Vec::new();
    DocsWriter::default()
        .write_to(&extraction(), &OutputMode::Console, &mut buffer)
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let rule = ":".repeat(60);
    assert!(text.starts_with(&format!("{rule}\n::: utils\n{rule}\nUtilities.\n")));
    assert!(text.contains(&format!("{rule}\n::: X\n{rule}\nDoc B\n")));
}
