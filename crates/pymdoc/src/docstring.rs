//! Docstring normalization.

const TAB_SIZE: usize = 8;

/// Clean up the indentation of a docstring.
///
/// Tabs are expanded, the first line loses its leading whitespace, the common
/// indentation of the remaining non-blank lines is removed, and leading and
/// trailing blank lines are dropped.
pub fn clean_docstring(raw: &str) -> String {
    let expanded = expand_tabs(raw);
    let mut lines: Vec<&str> = expanded.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line))
        .min();

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    cleaned.push(lines.remove(0).trim_start().to_string());
    for line in lines {
        let stripped = match margin {
            Some(margin) => line.chars().skip(margin).collect(),
            None => line.to_string(),
        };
        cleaned.push(stripped);
    }

    while cleaned.last().is_some_and(|line| line.trim().is_empty()) {
        cleaned.pop();
    }
    let first_content = cleaned
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(cleaned.len());

    cleaned[first_content..].join("\n")
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Ensure `text` ends with exactly one newline.
pub fn with_single_trailing_newline(text: &str) -> String {
    let mut out = text.trim_end_matches(['\n', '\r']).to_string();
    out.push('\n');
    out
}
