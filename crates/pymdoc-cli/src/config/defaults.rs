pub fn default_extension() -> String {
    "md".to_string()
}

pub fn default_indent() -> usize {
    4
}

pub fn default_fence_language() -> String {
    "python".to_string()
}

pub fn default_signatures() -> bool {
    true
}
