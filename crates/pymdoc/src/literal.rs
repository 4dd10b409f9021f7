//! Python string literal decoding.
//!
//! Turns the source text of a single literal (`r'''...'''`, `"a\tb"`, `b"x"`)
//! into its runtime value. Only plain string literals carry a decoded value;
//! bytes and f-strings are classified but left as written.

use std::iter::Peekable;
use std::str::Chars;

/// Classification of a string literal by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Str,
    Bytes,
    FString,
}

/// A decoded literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub kind: LiteralKind,
    /// Runtime value for `Str`; the body between the quotes otherwise.
    pub value: String,
}

/// Decode one literal. Returns `None` when `text` is not a quoted literal.
pub fn decode_string_literal(text: &str) -> Option<StringLiteral> {
    let prefix_len = text
        .find(|c: char| c == '"' || c == '\'')
        .filter(|&idx| text[..idx].chars().all(|c| "rRuUbBfF".contains(c)))?;
    let prefix = text[..prefix_len].to_ascii_lowercase();
    let rest = &text[prefix_len..];

    let quote = if rest.starts_with("\"\"\"") || rest.starts_with("'''") {
        &rest[..3]
    } else {
        &rest[..1]
    };
    if rest.len() < quote.len() * 2 || !rest.ends_with(quote) {
        return None;
    }
    let body = &rest[quote.len()..rest.len() - quote.len()];

    let kind = if prefix.contains('b') {
        LiteralKind::Bytes
    } else if prefix.contains('f') {
        LiteralKind::FString
    } else {
        LiteralKind::Str
    };

    let value = match kind {
        LiteralKind::Str if !prefix.contains('r') => unescape(body),
        _ => body.to_string(),
    };

    Some(StringLiteral { kind, value })
}

/// Resolve backslash escapes the way the Python tokenizer does for `str`.
///
/// `\N{...}` and unrecognised escapes are kept verbatim, backslash included.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('\\'),
            Some('\n') => {}
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{0b}'),
            Some(first @ '0'..='7') => {
                let mut digits = String::from(first);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(&d @ '0'..='7') => {
                            digits.push(d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let code = u32::from_str_radix(&digits, 8).unwrap_or_default();
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(marker @ ('x' | 'u' | 'U')) => {
                let width = match marker {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                push_hex_escape(&mut out, &mut chars, marker, width);
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn push_hex_escape(out: &mut String, chars: &mut Peekable<Chars<'_>>, marker: char, width: usize) {
    let mut digits = String::with_capacity(width);
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }

    let decoded = (digits.len() == width)
        .then(|| u32::from_str_radix(&digits, 16).ok())
        .flatten()
        .and_then(char::from_u32);

    match decoded {
        Some(ch) => out.push(ch),
        None => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

/// Quote `value` as a double-quoted Python literal.
pub fn quote_double(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
