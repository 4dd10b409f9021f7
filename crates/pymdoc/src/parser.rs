//! Python parsing on top of tree-sitter.
//!
//! The concrete syntax tree is lowered into the owned [`SourceUnit`] model
//! right away, so nothing downstream depends on tree-sitter types. Any
//! `ERROR` or `MISSING` node aborts the parse with a [`SyntaxError`].

use std::path::Path;

use tracing::{debug, trace};
use tree_sitter::{Node as TsNode, Parser};

use crate::error::{DocsError, Result, SyntaxError};
use crate::literal::{decode_string_literal, LiteralKind};
use crate::model::{
    Argument, Assign, AssignTarget, DictItem, Expr, FunctionDef, Node, OtherStatement, Parameter,
    Parameters, SourceUnit,
};

/// Parse Python source text into a [`SourceUnit`].
pub fn parse(path: impl AsRef<Path>, source: &str) -> Result<SourceUnit> {
    let path = path.as_ref();
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| DocsError::Internal {
            message: format!("failed to load the Python grammar: {e}"),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| DocsError::Internal {
            message: "tree-sitter returned no tree".to_string(),
        })?;
    let root = tree.root_node();

    if let Some(bad) = first_error(root) {
        let lowering = Lowering { path, source };
        return Err(lowering.error(bad, describe_error(bad, source)));
    }

    let lowering = Lowering { path, source };
    let body = lowering.block(root)?;
    debug!(path = %path.display(), statements = body.len(), "parsed module");

    Ok(SourceUnit {
        path: path.to_path_buf(),
        body,
    })
}

fn first_error(node: TsNode<'_>) -> Option<TsNode<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn describe_error(node: TsNode<'_>, source: &str) -> String {
    if node.is_missing() {
        return format!("expected `{}`", node.kind());
    }
    let snippet: String = source[node.byte_range()]
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .chars()
        .take(40)
        .collect();
    if snippet.is_empty() {
        "unexpected end of input".to_string()
    } else {
        format!("unexpected `{snippet}`")
    }
}

/// Named children without comments.
fn named(node: TsNode<'_>) -> Vec<TsNode<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Leaf tokens of `node` in source order. String literals count as one token
/// so their contents are never touched.
fn collect_tokens<'t>(node: TsNode<'t>, tokens: &mut Vec<TsNode<'t>>) {
    if node.kind() == "comment" {
        return;
    }
    if node.child_count() == 0 || node.kind() == "string" {
        tokens.push(node);
        return;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    for child in children {
        collect_tokens(child, tokens);
    }
}

/// A string literal statement, possibly wrapped in parentheses: `("doc")`.
fn parenthesized_string(node: TsNode<'_>) -> Option<TsNode<'_>> {
    let mut current = node;
    while current.kind() == "parenthesized_expression" {
        match named(current).as_slice() {
            [inner] => current = *inner,
            _ => return None,
        }
    }
    matches!(current.kind(), "string" | "concatenated_string").then_some(current)
}

enum ParameterEntry {
    Plain(Parameter),
    VarArg(String),
    KwArg(String),
    Star,
    Slash,
}

struct Lowering<'s> {
    path: &'s Path,
    source: &'s str,
}

impl<'s> Lowering<'s> {
    /// Source text of `node` with the gap between any two tokens reduced to
    /// one space (whitespace, line continuations and comments alike).
    fn token_text(&self, node: TsNode<'_>) -> String {
        let mut tokens = Vec::new();
        collect_tokens(node, &mut tokens);

        let mut text = String::new();
        let mut previous_end = None;
        for token in tokens {
            if previous_end.is_some_and(|end| token.start_byte() > end) {
                text.push(' ');
            }
            text.push_str(self.text(token));
            previous_end = Some(token.end_byte());
        }
        text
    }

    fn raw(&self, node: TsNode<'_>) -> Expr {
        Expr::Raw(self.token_text(node))
    }

    fn text(&self, node: TsNode<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    fn error(&self, node: TsNode<'_>, message: impl Into<String>) -> DocsError {
        SyntaxError::new(
            self.path,
            self.source,
            message,
            node.start_byte(),
            node.end_byte(),
        )
        .into()
    }

    fn field<'t>(&self, node: TsNode<'t>, name: &str) -> Result<TsNode<'t>> {
        node.child_by_field_name(name)
            .ok_or_else(|| self.error(node, format!("`{}` without {name}", node.kind())))
    }

    fn block(&self, node: TsNode<'_>) -> Result<Vec<Node>> {
        named(node)
            .into_iter()
            .map(|child| self.statement(child))
            .collect()
    }

    fn statement(&self, node: TsNode<'_>) -> Result<Node> {
        trace!(kind = node.kind(), line = node.start_position().row + 1, "statement");
        match node.kind() {
            "expression_statement" => self.expression_statement(node),
            "function_definition" => self.function_definition(node).map(Node::FunctionDef),
            "decorated_definition" => match node.child_by_field_name("definition") {
                Some(definition) => self.statement(definition),
                None => self.other_statement(node),
            },
            _ => self.other_statement(node),
        }
    }

    fn other_statement(&self, node: TsNode<'_>) -> Result<Node> {
        Ok(Node::Other(OtherStatement {
            kind: node.kind().to_string(),
            blocks: self.nested_blocks(node)?,
        }))
    }

    fn nested_blocks(&self, node: TsNode<'_>) -> Result<Vec<Vec<Node>>> {
        let mut blocks = Vec::new();
        for child in named(node) {
            if child.kind() == "block" {
                blocks.push(self.block(child)?);
            } else if child.kind().ends_with("_clause") {
                blocks.extend(self.nested_blocks(child)?);
            }
        }
        Ok(blocks)
    }

    fn expression_statement(&self, node: TsNode<'_>) -> Result<Node> {
        let children = named(node);
        match children.as_slice() {
            [single] => match single.kind() {
                "assignment" => self.assignment(*single),
                "augmented_assignment" => Ok(Node::Other(OtherStatement {
                    kind: "augmented_assignment".to_string(),
                    blocks: Vec::new(),
                })),
                "parenthesized_expression" => match parenthesized_string(*single) {
                    Some(string) => Ok(Node::ExprStatement(self.expr(string)?)),
                    None => Ok(Node::ExprStatement(self.expr(*single)?)),
                },
                _ => Ok(Node::ExprStatement(self.expr(*single)?)),
            },
            many => Ok(Node::ExprStatement(Expr::Tuple(self.exprs(many)?))),
        }
    }

    fn assignment(&self, node: TsNode<'_>) -> Result<Node> {
        let mut targets = Vec::new();
        let mut current = node;
        loop {
            targets.push(self.assign_target(self.field(current, "left")?));
            match current.child_by_field_name("right") {
                Some(right) if right.kind() == "assignment" => current = right,
                Some(right) => {
                    let value = self.expr(right)?;
                    return Ok(Node::Assign(Assign { targets, value }));
                }
                // Bare annotation: `x: int`.
                None => {
                    return Ok(Node::Other(OtherStatement {
                        kind: "annotation".to_string(),
                        blocks: Vec::new(),
                    }))
                }
            }
        }
    }

    fn assign_target(&self, node: TsNode<'_>) -> AssignTarget {
        match node.kind() {
            "identifier" => AssignTarget::Name(self.text(node).to_string()),
            "attribute" if is_dotted_name(node) => {
                AssignTarget::Attribute(self.text(node).split_whitespace().collect())
            }
            _ => AssignTarget::Other(collapse_whitespace(self.text(node))),
        }
    }

    fn function_definition(&self, node: TsNode<'_>) -> Result<FunctionDef> {
        let name = self.text(self.field(node, "name")?).to_string();
        let is_async = node.child(0).is_some_and(|first| first.kind() == "async");
        let parameters = match node.child_by_field_name("parameters") {
            Some(parameters) => self.parameters(parameters)?,
            None => Parameters::default(),
        };
        let body = match node.child_by_field_name("body") {
            Some(body) => self.block(body)?,
            None => Vec::new(),
        };
        Ok(FunctionDef {
            name,
            parameters,
            body,
            is_async,
        })
    }

    /// Lower `parameters` / `lambda_parameters`, enforcing the ordering rules
    /// the signature renderer depends on.
    fn parameters(&self, node: TsNode<'_>) -> Result<Parameters> {
        let mut parameters = Parameters::default();
        let mut after_star = false;
        let mut seen_default = false;

        for child in named(node) {
            let entry = self.parameter_entry(child)?;
            let declared = match &entry {
                ParameterEntry::Plain(parameter) => Some(parameter.name.as_str()),
                ParameterEntry::VarArg(name) | ParameterEntry::KwArg(name) => Some(name.as_str()),
                ParameterEntry::Star | ParameterEntry::Slash => None,
            };
            if let Some(name) = declared {
                if parameters.names().contains(&name) {
                    return Err(self.error(
                        child,
                        format!("duplicate argument '{name}' in function definition"),
                    ));
                }
            }

            match entry {
                ParameterEntry::Plain(parameter) if after_star => {
                    parameters.keyword_only.push(parameter);
                }
                ParameterEntry::Plain(parameter) => {
                    if parameter.default.is_some() {
                        seen_default = true;
                    } else if seen_default {
                        return Err(self.error(
                            child,
                            "parameter without a default follows parameter with a default",
                        ));
                    }
                    parameters.positional.push(parameter);
                }
                ParameterEntry::VarArg(name) => {
                    parameters.var_arg = Some(name);
                    after_star = true;
                }
                ParameterEntry::KwArg(name) => parameters.kw_arg = Some(name),
                ParameterEntry::Star => after_star = true,
                ParameterEntry::Slash => {}
            }
        }

        Ok(parameters)
    }

    fn parameter_entry(&self, node: TsNode<'_>) -> Result<ParameterEntry> {
        let entry = match node.kind() {
            "identifier" => ParameterEntry::Plain(Parameter::new(self.text(node))),
            "typed_parameter" => match named(node).first() {
                Some(inner) => self.parameter_entry(*inner)?,
                None => return Err(self.error(node, "typed parameter without a name")),
            },
            "default_parameter" | "typed_default_parameter" => {
                let name = collapse_whitespace(self.text(self.field(node, "name")?));
                let value = self.expr(self.field(node, "value")?)?;
                ParameterEntry::Plain(Parameter::with_default(name, value))
            }
            "list_splat_pattern" => ParameterEntry::VarArg(self.splat_name(node)),
            "dictionary_splat_pattern" => ParameterEntry::KwArg(self.splat_name(node)),
            "keyword_separator" => ParameterEntry::Star,
            "positional_separator" => ParameterEntry::Slash,
            _ => ParameterEntry::Plain(Parameter::new(collapse_whitespace(self.text(node)))),
        };
        Ok(entry)
    }

    fn splat_name(&self, node: TsNode<'_>) -> String {
        match named(node).first() {
            Some(inner) => self.text(*inner).to_string(),
            None => self.text(node).trim_start_matches('*').trim().to_string(),
        }
    }

    fn exprs(&self, nodes: &[TsNode<'_>]) -> Result<Vec<Expr>> {
        nodes.iter().map(|node| self.expr(*node)).collect()
    }

    fn children_exprs(&self, node: TsNode<'_>) -> Result<Vec<Expr>> {
        self.exprs(&named(node))
    }

    fn boxed(&self, node: TsNode<'_>, field: &str) -> Result<Box<Expr>> {
        Ok(Box::new(self.expr(self.field(node, field)?)?))
    }

    fn expr(&self, node: TsNode<'_>) -> Result<Expr> {
        let expr = match node.kind() {
            "identifier" | "true" | "false" | "none" | "ellipsis" => {
                Expr::Name(self.text(node).to_string())
            }
            "integer" | "float" => Expr::Number(self.text(node).to_string()),
            "string" => self.string(node),
            "concatenated_string" => self.concatenated_string(node),
            "list" => Expr::List(self.children_exprs(node)?),
            "tuple" | "expression_list" | "pattern_list" => Expr::Tuple(self.children_exprs(node)?),
            "set" => Expr::Set(self.children_exprs(node)?),
            "dictionary" => Expr::Dict(self.dict_items(node)?),
            "parenthesized_expression" => match named(node).first() {
                Some(inner) => Expr::Paren(Box::new(self.expr(*inner)?)),
                None => Expr::Tuple(Vec::new()),
            },
            "call" => self.call(node)?,
            "attribute" => Expr::Attribute {
                value: self.boxed(node, "object")?,
                attr: self.text(self.field(node, "attribute")?).to_string(),
            },
            "subscript" => {
                let mut cursor = node.walk();
                let index: Vec<_> = node
                    .children_by_field_name("subscript", &mut cursor)
                    .collect();
                Expr::Subscript {
                    value: self.boxed(node, "value")?,
                    index: self.exprs(&index)?,
                }
            }
            "unary_operator" => Expr::Unary {
                op: self.field(node, "operator")?.kind().to_string(),
                operand: self.boxed(node, "argument")?,
            },
            "not_operator" => Expr::Not(self.boxed(node, "argument")?),
            "binary_operator" | "boolean_operator" => Expr::Binary {
                left: self.boxed(node, "left")?,
                op: self.field(node, "operator")?.kind().to_string(),
                right: self.boxed(node, "right")?,
            },
            "comparison_operator" => self.comparison(node)?,
            "lambda" => Expr::Lambda {
                parameters: match node.child_by_field_name("parameters") {
                    Some(parameters) => self.parameters(parameters)?,
                    None => Parameters::default(),
                },
                body: self.boxed(node, "body")?,
            },
            "conditional_expression" => match named(node).as_slice() {
                [body, test, orelse] => Expr::Conditional {
                    body: Box::new(self.expr(*body)?),
                    test: Box::new(self.expr(*test)?),
                    orelse: Box::new(self.expr(*orelse)?),
                },
                _ => self.raw(node),
            },
            "list_splat" | "list_splat_pattern" => match named(node).first() {
                Some(inner) => Expr::Starred(Box::new(self.expr(*inner)?)),
                None => self.raw(node),
            },
            _ => self.raw(node),
        };
        Ok(expr)
    }

    fn string(&self, node: TsNode<'_>) -> Expr {
        let text = self.text(node);
        match decode_string_literal(text) {
            Some(literal) => match literal.kind {
                LiteralKind::Str => Expr::Str(literal.value),
                LiteralKind::Bytes => Expr::Bytes(text.to_string()),
                LiteralKind::FString => Expr::FString(text.to_string()),
            },
            None => Expr::Raw(text.to_string()),
        }
    }

    fn concatenated_string(&self, node: TsNode<'_>) -> Expr {
        let parts: Vec<_> = named(node).into_iter().map(|part| self.string(part)).collect();
        if parts.iter().all(|part| matches!(part, Expr::Str(_))) {
            let joined: String = parts
                .into_iter()
                .filter_map(|part| match part {
                    Expr::Str(value) => Some(value),
                    _ => None,
                })
                .collect();
            return Expr::Str(joined);
        }

        let text = self.token_text(node);
        if parts.iter().any(|part| matches!(part, Expr::FString(_))) {
            Expr::FString(text)
        } else if parts.iter().all(|part| matches!(part, Expr::Bytes(_))) {
            Expr::Bytes(text)
        } else {
            Expr::Raw(text)
        }
    }

    fn dict_items(&self, node: TsNode<'_>) -> Result<Vec<DictItem>> {
        named(node)
            .into_iter()
            .map(|child| match child.kind() {
                "pair" => Ok(DictItem::Pair(
                    self.expr(self.field(child, "key")?)?,
                    self.expr(self.field(child, "value")?)?,
                )),
                "dictionary_splat" => match named(child).first() {
                    Some(inner) => Ok(DictItem::Splat(self.expr(*inner)?)),
                    None => Err(self.error(child, "`**` without a mapping")),
                },
                _ => Ok(DictItem::Splat(self.raw(child))),
            })
            .collect()
    }

    fn call(&self, node: TsNode<'_>) -> Result<Expr> {
        let func = self.boxed(node, "function")?;
        let arguments = self.field(node, "arguments")?;
        let args = if arguments.kind() == "argument_list" {
            named(arguments)
                .into_iter()
                .map(|arg| self.argument(arg))
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![Argument::Positional(self.raw(arguments))]
        };
        Ok(Expr::Call { func, args })
    }

    fn argument(&self, node: TsNode<'_>) -> Result<Argument> {
        let argument = match node.kind() {
            "keyword_argument" => Argument::Keyword {
                name: self.text(self.field(node, "name")?).to_string(),
                value: self.expr(self.field(node, "value")?)?,
            },
            "list_splat" => match named(node).first() {
                Some(inner) => Argument::Star(self.expr(*inner)?),
                None => return Err(self.error(node, "`*` without an iterable")),
            },
            "dictionary_splat" => match named(node).first() {
                Some(inner) => Argument::DoubleStar(self.expr(*inner)?),
                None => return Err(self.error(node, "`**` without a mapping")),
            },
            _ => Argument::Positional(self.expr(node)?),
        };
        Ok(argument)
    }

    fn comparison(&self, node: TsNode<'_>) -> Result<Expr> {
        let mut cursor = node.walk();
        let children: Vec<_> = node
            .children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();

        let mut operands = Vec::new();
        let mut operators = Vec::new();
        for child in children {
            if child.is_named() {
                operands.push(self.expr(child)?);
            } else {
                operators.push(child.kind().to_string());
            }
        }

        if operands.len() != operators.len() + 1 {
            return Ok(self.raw(node));
        }
        let mut operands = operands.into_iter();
        let left = match operands.next() {
            Some(left) => Box::new(left),
            None => return Err(self.error(node, "comparison without operands")),
        };
        Ok(Expr::Compare {
            left,
            rest: operators.into_iter().zip(operands).collect(),
        })
    }
}

fn is_dotted_name(node: TsNode<'_>) -> bool {
    match node.kind() {
        "identifier" => true,
        "attribute" => node
            .child_by_field_name("object")
            .is_some_and(is_dotted_name),
        _ => false,
    }
}
