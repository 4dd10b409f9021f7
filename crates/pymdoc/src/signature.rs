//! Call-style rendering of function signatures.
//!
//! ```text
//! def connect(host, port=8080, *args, timeout=None, retries, **options): ...
//! ```
//!
//! renders as
//!
//! ````text
//! ```python
//! connect(
//!     host,
//!     port=8080,
//!     *args,
//!     timeout=None,
//!     retries=retries,
//!     **options
//! )
//! ```
//! ````
//!
//! Keyword-only parameters are always rendered as keywords, so the call stays
//! valid Python even when one has no default.

use std::collections::HashSet;

use crate::error::{DocsError, Result};
use crate::literal::quote_double;
use crate::model::{Argument, DictItem, Expr, Parameter, Parameters};

/// Layout options for rendered signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureStyle {
    /// Spaces before each parameter line.
    pub indent: usize,
    /// Info string of the fenced code block.
    pub fence_language: String,
}

impl Default for SignatureStyle {
    fn default() -> Self {
        Self {
            indent: 4,
            fence_language: "python".to_string(),
        }
    }
}

/// Render `name(parameters)` as a fenced Markdown code block.
///
/// Fails with [`DocsError::MalformedSignature`] when the parameter list could
/// not have come from valid source.
pub fn render_signature(name: &str, parameters: &Parameters, style: &SignatureStyle) -> Result<String> {
    validate(name, parameters)?;

    let items = parameter_items(parameters);
    let call = if items.is_empty() {
        format!("{name}()")
    } else {
        let indent = " ".repeat(style.indent);
        let lines: Vec<String> = items.iter().map(|item| format!("{indent}{item}")).collect();
        format!("{name}(\n{}\n)", lines.join(",\n"))
    };

    Ok(format!("```{}\n{call}\n```", style.fence_language))
}

fn validate(function: &str, parameters: &Parameters) -> Result<()> {
    let mut seen_default = false;
    for parameter in &parameters.positional {
        match (&parameter.default, seen_default) {
            (Some(_), _) => seen_default = true,
            (None, true) => {
                return Err(DocsError::malformed_signature(
                    function,
                    format!(
                        "parameter '{}' without a default follows a parameter with a default",
                        parameter.name
                    ),
                ))
            }
            (None, false) => {}
        }
    }

    let mut seen = HashSet::new();
    for name in parameters.names() {
        if name.is_empty() {
            return Err(DocsError::malformed_signature(function, "empty parameter name"));
        }
        if !seen.insert(name) {
            return Err(DocsError::malformed_signature(
                function,
                format!("duplicate parameter '{name}'"),
            ));
        }
    }
    Ok(())
}

/// One rendered entry per parameter, in call order.
fn parameter_items(parameters: &Parameters) -> Vec<String> {
    let mut items: Vec<String> = parameters.positional.iter().map(render_parameter).collect();
    if let Some(var_arg) = &parameters.var_arg {
        items.push(format!("*{var_arg}"));
    }
    items.extend(parameters.keyword_only.iter().map(render_keyword));
    if let Some(kw_arg) = &parameters.kw_arg {
        items.push(format!("**{kw_arg}"));
    }
    items
}

/// Parameter list as it is declared, with a bare `*` before keyword-only
/// parameters when there is no `*args`.
fn declared_items(parameters: &Parameters) -> Vec<String> {
    let mut items: Vec<String> = parameters.positional.iter().map(render_parameter).collect();
    match &parameters.var_arg {
        Some(var_arg) => items.push(format!("*{var_arg}")),
        None if !parameters.keyword_only.is_empty() => items.push("*".to_string()),
        None => {}
    }
    items.extend(parameters.keyword_only.iter().map(render_parameter));
    if let Some(kw_arg) = &parameters.kw_arg {
        items.push(format!("**{kw_arg}"));
    }
    items
}

fn render_parameter(parameter: &Parameter) -> String {
    match &parameter.default {
        Some(default) => format!("{}={}", parameter.name, render_expr(default)),
        None => parameter.name.clone(),
    }
}

/// `name=default`, or `name=name` for a required keyword-only parameter.
fn render_keyword(parameter: &Parameter) -> String {
    match &parameter.default {
        Some(default) => format!("{}={}", parameter.name, render_expr(default)),
        None => format!("{0}={0}", parameter.name),
    }
}

/// Canonical source text for an expression: double-quoted strings, `", "`
/// between items, spaces around binary operators.
pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Name(text) | Expr::Number(text) | Expr::Bytes(text) | Expr::FString(text) => {
            text.clone()
        }
        Expr::Raw(text) => text.clone(),
        Expr::Str(value) => quote_double(value),
        Expr::List(items) => format!("[{}]", join(items)),
        Expr::Tuple(items) if items.len() == 1 => format!("({},)", render_expr(&items[0])),
        Expr::Tuple(items) => format!("({})", join(items)),
        Expr::Set(items) => format!("{{{}}}", join(items)),
        Expr::Dict(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| match item {
                    DictItem::Pair(key, value) => {
                        format!("{}: {}", render_expr(key), render_expr(value))
                    }
                    DictItem::Splat(value) => format!("**{}", render_expr(value)),
                })
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        Expr::Call { func, args } => {
            let rendered: Vec<String> = args.iter().map(render_argument).collect();
            format!("{}({})", render_expr(func), rendered.join(", "))
        }
        Expr::Attribute { value, attr } => format!("{}.{attr}", render_expr(value)),
        Expr::Subscript { value, index } => format!("{}[{}]", render_expr(value), join(index)),
        Expr::Unary { op, operand } => format!("{op}{}", render_expr(operand)),
        Expr::Not(operand) => format!("not {}", render_expr(operand)),
        Expr::Binary { left, op, right } => {
            format!("{} {op} {}", render_expr(left), render_expr(right))
        }
        Expr::Compare { left, rest } => {
            let mut out = render_expr(left);
            for (op, operand) in rest {
                out.push_str(&format!(" {op} {}", render_expr(operand)));
            }
            out
        }
        Expr::Lambda { parameters, body } => {
            let items = declared_items(parameters);
            if items.is_empty() {
                format!("lambda: {}", render_expr(body))
            } else {
                format!("lambda {}: {}", items.join(", "), render_expr(body))
            }
        }
        Expr::Conditional { body, test, orelse } => format!(
            "{} if {} else {}",
            render_expr(body),
            render_expr(test),
            render_expr(orelse)
        ),
        Expr::Paren(inner) => format!("({})", render_expr(inner)),
        Expr::Starred(inner) => format!("*{}", render_expr(inner)),
    }
}

fn render_argument(argument: &Argument) -> String {
    match argument {
        Argument::Positional(value) => render_expr(value),
        Argument::Keyword { name, value } => format!("{name}={}", render_expr(value)),
        Argument::Star(value) => format!("*{}", render_expr(value)),
        Argument::DoubleStar(value) => format!("**{}", render_expr(value)),
    }
}

fn join(items: &[Expr]) -> String {
    items.iter().map(render_expr).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> Expr {
        Expr::Number(text.to_string())
    }

    fn name(text: &str) -> Expr {
        Expr::Name(text.to_string())
    }

    #[test]
    fn renders_positional_and_defaults() {
        let parameters = Parameters {
            positional: vec![Parameter::new("a"), Parameter::with_default("b", num("1"))],
            ..Default::default()
        };
        let rendered = render_signature("foo", &parameters, &SignatureStyle::default()).unwrap();
        assert_eq!(rendered, "```python\nfoo(\n    a,\n    b=1\n)\n```");
    }

    #[test]
    fn variadics_come_last() {
        let parameters = Parameters {
            positional: vec![Parameter::new("host")],
            var_arg: Some("args".to_string()),
            keyword_only: vec![Parameter::with_default("timeout", name("None"))],
            kw_arg: Some("options".to_string()),
        };
        let rendered = render_signature("connect", &parameters, &SignatureStyle::default()).unwrap();
        assert_eq!(
            rendered,
            "```python\nconnect(\n    host,\n    *args,\n    timeout=None,\n    **options\n)\n```"
        );
    }

    #[test]
    fn required_keyword_only_parameters_are_passed_by_name() {
        let parameters = Parameters {
            positional: vec![Parameter::with_default("a", num("1"))],
            keyword_only: vec![Parameter::new("b"), Parameter::with_default("c", num("2"))],
            ..Default::default()
        };
        let rendered = render_signature("f", &parameters, &SignatureStyle::default()).unwrap();
        assert_eq!(rendered, "```python\nf(\n    a=1,\n    b=b,\n    c=2\n)\n```");

        let with_var_arg = Parameters {
            var_arg: Some("args".to_string()),
            ..parameters
        };
        let rendered = render_signature("g", &with_var_arg, &SignatureStyle::default()).unwrap();
        assert_eq!(
            rendered,
            "```python\ng(\n    a=1,\n    *args,\n    b=b,\n    c=2\n)\n```"
        );
    }

    #[test]
    fn empty_parameter_list_stays_on_one_line() {
        let rendered =
            render_signature("simple_func", &Parameters::default(), &SignatureStyle::default())
                .unwrap();
        assert_eq!(rendered, "```python\nsimple_func()\n```");
    }

    #[test]
    fn honours_style() {
        let parameters = Parameters {
            positional: vec![Parameter::new("x")],
            ..Default::default()
        };
        let style = SignatureStyle {
            indent: 2,
            fence_language: "py".to_string(),
        };
        assert_eq!(
            render_signature("f", &parameters, &style).unwrap(),
            "```py\nf(\n  x\n)\n```"
        );
    }

    #[test]
    fn malformed_defaults_fail_loudly() {
        let parameters = Parameters {
            positional: vec![Parameter::with_default("a", num("1")), Parameter::new("b")],
            ..Default::default()
        };
        let err = render_signature("bad", &parameters, &SignatureStyle::default()).unwrap_err();
        assert!(matches!(err, DocsError::MalformedSignature { ref function, .. } if function == "bad"));
    }

    #[test]
    fn duplicate_names_fail_loudly() {
        let parameters = Parameters {
            positional: vec![Parameter::new("a")],
            kw_arg: Some("a".to_string()),
            ..Default::default()
        };
        assert!(render_signature("dup", &parameters, &SignatureStyle::default()).is_err());
    }

    #[test]
    fn strings_are_double_quoted() {
        assert_eq!(render_expr(&Expr::Str("it's".to_string())), "\"it's\"");
        assert_eq!(render_expr(&Expr::Str("say \"x\"".to_string())), r#""say \"x\"""#);
    }

    #[test]
    fn containers_and_calls_use_canonical_spacing() {
        let dict = Expr::Dict(vec![
            DictItem::Pair(Expr::Str("k".to_string()), Expr::List(vec![num("1"), num("2")])),
            DictItem::Splat(name("extra")),
        ]);
        assert_eq!(render_expr(&dict), r#"{"k": [1, 2], **extra}"#);

        let call = Expr::Call {
            func: Box::new(Expr::Attribute {
                value: Box::new(name("os")),
                attr: "getenv".to_string(),
            }),
            args: vec![
                Argument::Positional(Expr::Str("HOME".to_string())),
                Argument::Keyword {
                    name: "default".to_string(),
                    value: name("None"),
                },
            ],
        };
        assert_eq!(render_expr(&call), r#"os.getenv("HOME", default=None)"#);

        assert_eq!(render_expr(&Expr::Tuple(vec![num("1")])), "(1,)");
        assert_eq!(render_expr(&Expr::Tuple(vec![])), "()");
    }

    #[test]
    fn operators_render_with_spaces() {
        let sum = Expr::Binary {
            left: Box::new(name("x")),
            op: "+".to_string(),
            right: Box::new(num("1")),
        };
        assert_eq!(render_expr(&sum), "x + 1");

        let negative = Expr::Unary {
            op: "-".to_string(),
            operand: Box::new(num("1")),
        };
        assert_eq!(render_expr(&negative), "-1");
        assert_eq!(render_expr(&Expr::Not(Box::new(name("flag")))), "not flag");

        let lambda = Expr::Lambda {
            parameters: Parameters {
                positional: vec![Parameter::new("x")],
                ..Default::default()
            },
            body: Box::new(name("x")),
        };
        assert_eq!(render_expr(&lambda), "lambda x: x");

        let keyword_only = Expr::Lambda {
            parameters: Parameters {
                keyword_only: vec![Parameter::new("b")],
                ..Default::default()
            },
            body: Box::new(name("b")),
        };
        assert_eq!(render_expr(&keyword_only), "lambda *, b: b");
    }
}
