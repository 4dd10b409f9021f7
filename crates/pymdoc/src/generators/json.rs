use serde::Serialize;

use crate::error::{DocsError, Result};
use crate::model::Extraction;

/// Pretty-printed JSON representation of an extraction including metadata.
pub fn render_json(extraction: &Extraction) -> Result<String> {
    let payload = JsonPayload {
        version: env!("CARGO_PKG_VERSION"),
        extraction,
    };

    serde_json::to_string_pretty(&payload).map_err(|error| DocsError::Internal {
        message: format!("failed to serialize documentation: {error}"),
    })
}

#[derive(Serialize)]
struct JsonPayload<'a> {
    version: &'static str,
    extraction: &'a Extraction,
}
