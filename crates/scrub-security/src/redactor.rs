use scrub_core::{Body, Part};
use serde::{Deserialize, Serialize};

use crate::spec::RedactionSpec;
use crate::{json, multipart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionType {
    JsonField,
    ImagePart,
}

/// One replaced value: a JSON member path or a multipart field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionInfo {
    pub location: String,
    pub redaction_type: RedactionType,
}

/// Redaction engine for message bodies
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    spec: RedactionSpec,
}

impl Redactor {
    pub fn new(spec: RedactionSpec) -> Self {
        Self { spec }
    }

    /// Redact JSON string fields of a body.
    ///
    /// Only text bodies are examined; empty and multipart bodies come back
    /// unchanged.
    pub fn redact_json(&self, body: &Body) -> (Body, Vec<RedactionInfo>) {
        match body {
            Body::Text(text) => {
                let (redacted, redactions) = json::redact_body(text, &self.spec);
                (Body::Text(redacted), redactions)
            }
            other => (other.clone(), Vec::new()),
        }
    }

    /// Replace image parts with placeholder parts
    pub fn redact_multipart(&self, parts: &[Part]) -> (Vec<Part>, Vec<RedactionInfo>) {
        multipart::redact_parts(parts)
    }
}
