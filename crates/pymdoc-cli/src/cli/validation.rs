use regex::Regex;

/// Validate a `--filter` pattern at argument-parsing time.
pub fn parse_filter(pattern: &str) -> Result<String, String> {
    Regex::new(pattern)
        .map(|_| pattern.to_string())
        .map_err(|e| format!("invalid regular expression: {e}"))
}

/// Validate a per-symbol file extension.
pub fn parse_extension(extension: &str) -> Result<String, String> {
    if extension.is_empty() {
        return Err("Extension cannot be empty".to_string());
    }
    if extension.starts_with('.') {
        return Err(format!(
            "Extension must not start with a dot (use '{}')",
            extension.trim_start_matches('.')
        ));
    }
    if extension.contains(['/', '\\']) {
        return Err("Extension must not contain path separators".to_string());
    }
    Ok(extension.to_string())
}
