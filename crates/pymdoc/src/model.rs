use std::path::PathBuf;

use serde::Serialize;

/// Parsed representation of one Python source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// File-system path (or virtual path) of the module.
    pub path: PathBuf,
    /// Top-level statements in source order.
    pub body: Vec<Node>,
}

impl SourceUnit {
    /// Module name derived from the file stem (`pkg/util.py` -> `util`).
    pub fn module_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_string())
    }
}

/// Statement-level syntax node relevant to documentation extraction.
#[derive(Debug, Clone)]
pub enum Node {
    FunctionDef(FunctionDef),
    Assign(Assign),
    ExprStatement(Expr),
    Other(OtherStatement),
}

/// `def` / `async def` statement.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Parameters,
    pub body: Vec<Node>,
    pub is_async: bool,
}

impl FunctionDef {
    /// The raw docstring: the first body statement when it is a plain string literal.
    pub fn docstring(&self) -> Option<&str> {
        match self.body.first() {
            Some(Node::ExprStatement(Expr::Str(text))) => Some(text),
            _ => None,
        }
    }
}

/// Assignment statement (`x = 1`, `a = b = 1`, `x: int = 1`).
#[derive(Debug, Clone)]
pub struct Assign {
    /// Targets in source order.
    pub targets: Vec<AssignTarget>,
    pub value: Expr,
}

impl Assign {
    /// Name a following docstring would document, taken from the first target.
    pub fn documented_name(&self) -> Option<&str> {
        match self.targets.first()? {
            AssignTarget::Name(name) | AssignTarget::Attribute(name) => Some(name),
            AssignTarget::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignTarget {
    /// Plain identifier.
    Name(String),
    /// Dotted attribute chain such as `self.value`.
    Attribute(String),
    /// Tuple, subscript or starred target, kept as source text.
    Other(String),
}

/// Any other statement. Compound statements keep each nested block separately.
#[derive(Debug, Clone)]
pub struct OtherStatement {
    /// Grammar kind of the statement (`class_definition`, `if_statement`, ...).
    pub kind: String,
    pub blocks: Vec<Vec<Node>>,
}

/// Parameter list of a function or lambda.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    /// Parameters before `*` / `*args`, in declared order.
    pub positional: Vec<Parameter>,
    pub var_arg: Option<String>,
    /// Parameters after `*` / `*args`.
    pub keyword_only: Vec<Parameter>,
    pub kw_arg: Option<String>,
}

impl Parameters {
    /// All declared names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.positional.iter().map(|p| p.name.as_str()).collect();
        names.extend(self.var_arg.as_deref());
        names.extend(self.keyword_only.iter().map(|p| p.name.as_str()));
        names.extend(self.kw_arg.as_deref());
        names
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Expr>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Expr) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// Lowered expression, detailed enough to print default values canonically.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier or keyword constant (`True`, `None`, `...`).
    Name(String),
    /// Numeric literal as written.
    Number(String),
    /// Decoded string value.
    Str(String),
    /// Bytes literal, source text.
    Bytes(String),
    /// f-string, source text.
    FString(String),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Set(Vec<Expr>),
    Dict(Vec<DictItem>),
    Call {
        func: Box<Expr>,
        args: Vec<Argument>,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Subscript {
        value: Box<Expr>,
        index: Vec<Expr>,
    },
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Not(Box<Expr>),
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Compare {
        left: Box<Expr>,
        rest: Vec<(String, Expr)>,
    },
    Lambda {
        parameters: Parameters,
        body: Box<Expr>,
    },
    Conditional {
        body: Box<Expr>,
        test: Box<Expr>,
        orelse: Box<Expr>,
    },
    Paren(Box<Expr>),
    Starred(Box<Expr>),
    /// Anything else, as whitespace-collapsed source text.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DictItem {
    Pair(Expr, Expr),
    Splat(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Positional(Expr),
    Keyword { name: String, value: Expr },
    Star(Expr),
    DoubleStar(Expr),
}

/// One extracted unit of documentation tied to a symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRecord {
    pub symbol_name: String,
    pub documentation: String,
    /// Fenced call-style rendering, functions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl DocRecord {
    pub fn new(symbol_name: impl Into<String>, documentation: impl Into<String>) -> Self {
        Self {
            symbol_name: symbol_name.into(),
            documentation: documentation.into(),
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Module name used for the console banner of the module documentation.
    pub module_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_doc: Option<String>,
    /// Records in source order; duplicates are kept.
    pub records: Vec<DocRecord>,
}

impl Extraction {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            module_doc: None,
            records: Vec::new(),
        }
    }

    /// Returns `true` when neither module documentation nor records were found.
    pub fn is_empty(&self) -> bool {
        self.module_doc.is_none() && self.records.is_empty()
    }
}
