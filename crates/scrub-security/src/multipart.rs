//! Multipart body redaction

use scrub_core::headers::{CONTENT_DISPOSITION, CONTENT_TYPE};
use scrub_core::{ContentDisposition, Headers, Part, placeholder};

use crate::redactor::{RedactionInfo, RedactionType};

/// Field name used when an image part has none. Kept for compatibility, it
/// carries no meaning.
pub const DEFAULT_PART_NAME: &str = "Name";
const DEFAULT_DISPOSITION: &str = "form-data";

/// Replace every image part with a placeholder text part.
///
/// Output has the same parts in the same order; parts that are not images
/// are copied as they are.
pub fn redact_parts(parts: &[Part]) -> (Vec<Part>, Vec<RedactionInfo>) {
    let mut redactions = Vec::new();
    let redacted = parts
        .iter()
        .map(|part| {
            let is_image = part.content_type().is_some_and(|media| media.is_image());
            if !is_image {
                return part.clone();
            }
            let replacement = replace_image_part(part);
            let location = replacement
                .disposition()
                .and_then(|d| d.name)
                .unwrap_or_else(|| DEFAULT_PART_NAME.to_string());
            tracing::debug!("Redacted image part {} ({} bytes)", location, part.payload.len());
            redactions.push(RedactionInfo {
                location,
                redaction_type: RedactionType::ImagePart,
            });
            replacement
        })
        .collect();
    (redacted, redactions)
}

fn replace_image_part(part: &Part) -> Part {
    let source = part.disposition();
    let disposition = ContentDisposition {
        disposition: source
            .as_ref()
            .map(|d| d.disposition.clone())
            .unwrap_or_else(|| DEFAULT_DISPOSITION.to_string()),
        name: Some(
            source
                .as_ref()
                .and_then(|d| d.name.clone())
                .unwrap_or_else(|| DEFAULT_PART_NAME.to_string()),
        ),
        filename: source.and_then(|d| d.filename),
    };

    let mut headers = Headers::new();
    if let Some(content_type) = part.headers.get(CONTENT_TYPE) {
        headers.append(CONTENT_TYPE, content_type);
    }
    headers.append(CONTENT_DISPOSITION, disposition.to_string());

    Part {
        headers,
        payload: placeholder(&part.payload).into(),
    }
}
