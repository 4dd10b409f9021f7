use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, trace};

use crate::association::{Action, Association, Event};
use crate::docstring::clean_docstring;
use crate::error::{DocsError, Result};
use crate::model::{DocRecord, Expr, Extraction, FunctionDef, Node, SourceUnit};
use crate::parser::parse;
use crate::signature::{render_signature, SignatureStyle};

/// Options controlling documentation extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Render a call-style signature for documented functions.
    pub signatures: bool,
    /// Layout of rendered signatures.
    pub style: SignatureStyle,
    /// Keep only records whose symbol name matches.
    pub filter: Option<Regex>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            signatures: true,
            style: SignatureStyle::default(),
            filter: None,
        }
    }
}

/// Extracts docstrings from Python modules.
#[derive(Debug, Clone, Default)]
pub struct DocsExtractor {
    options: ExtractOptions,
}

impl DocsExtractor {
    /// Create a new extractor with the provided options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract documentation from a file on disk.
    ///
    /// A missing input is reported as [`DocsError::InputNotFound`] before any
    /// read or parse is attempted.
    pub fn extract_from_path(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocsError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let source = fs::read_to_string(path).map_err(|error| DocsError::io(path, error))?;
        self.extract_from_source(path, &source)
    }

    /// Extract documentation from an in-memory source string.
    pub fn extract_from_source(&self, path: impl AsRef<Path>, source: &str) -> Result<Extraction> {
        let unit = parse(path, source)?;
        self.extract(&unit)
    }

    /// Walk a parsed unit and collect module documentation and records.
    pub fn extract(&self, unit: &SourceUnit) -> Result<Extraction> {
        let mut walk = Walk {
            options: &self.options,
            association: Association::new(),
            extraction: Extraction::new(unit.module_name()),
        };
        walk.statements(&unit.body)?;

        let extraction = walk.extraction;
        debug!(
            module = %extraction.module_name,
            module_doc = extraction.module_doc.is_some(),
            records = extraction.records.len(),
            "extraction finished"
        );
        for record in &extraction.records {
            debug!("{}", ":".repeat(60));
            debug!("::: {}", record.symbol_name);
            debug!("{}\n{}\n", ":".repeat(60), record.documentation);
        }
        Ok(extraction)
    }
}

/// State of one pre-order walk.
struct Walk<'o> {
    options: &'o ExtractOptions,
    association: Association,
    extraction: Extraction,
}

impl Walk<'_> {
    fn statements(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            self.statement(node)?;
        }
        Ok(())
    }

    fn nested(&mut self, nodes: &[Node]) -> Result<()> {
        self.statements(nodes)?;
        self.association.step(Event::BlockEnd);
        Ok(())
    }

    fn statement(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::FunctionDef(def) => {
                self.association.step(Event::FunctionDef);
                self.function(def)?;
                self.nested(&def.body)?;
            }
            Node::Assign(assign) => {
                self.association.step(Event::Assign(assign.documented_name()));
            }
            Node::ExprStatement(Expr::Str(text)) => {
                match self.association.step(Event::StringExpr(text)) {
                    Action::ModuleDoc(text) => {
                        let cleaned = clean_docstring(text);
                        if !cleaned.is_empty() {
                            self.extraction.module_doc = Some(cleaned);
                        }
                    }
                    Action::Document { name, text } => {
                        trace!(symbol = %name, "assignment docstring");
                        self.push(DocRecord::new(name, clean_docstring(text)));
                    }
                    Action::Nothing => {}
                }
            }
            Node::ExprStatement(_) => {
                self.association.step(Event::Other);
            }
            Node::Other(other) => {
                self.association.step(Event::Other);
                for block in &other.blocks {
                    self.nested(block)?;
                }
            }
        }
        Ok(())
    }

    fn function(&mut self, def: &FunctionDef) -> Result<()> {
        let Some(raw) = def.docstring() else {
            trace!(function = %def.name, "no docstring");
            return Ok(());
        };

        let mut record = DocRecord::new(&def.name, clean_docstring(raw));
        if self.options.signatures {
            record.signature = Some(render_signature(
                &def.name,
                &def.parameters,
                &self.options.style,
            )?);
        }
        self.push(record);
        Ok(())
    }

    fn push(&mut self, record: DocRecord) {
        if record.documentation.is_empty() {
            trace!(symbol = %record.symbol_name, "skipping empty docstring");
            return;
        }
        if let Some(filter) = &self.options.filter {
            if !filter.is_match(&record.symbol_name) {
                trace!(symbol = %record.symbol_name, "filtered out");
                return;
            }
        }
        self.extraction.records.push(record);
    }
}
