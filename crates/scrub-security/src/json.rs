//! JSON body redaction

use scrub_core::{Bytes, Charset, TextBody, placeholder};
use serde_json::{Map, Value};

use crate::redactor::{RedactionInfo, RedactionType};
use crate::spec::RedactionSpec;

const DEFAULT_MEDIA_TYPE: &str = "application/json";
const DEFAULT_CHARSET: &str = "utf-8";

/// Replace matching string members of `object` in place.
///
/// Nested objects are descended into; arrays only with array traversal enabled.
/// Structure, member order and every other value are left as they are.
pub fn redact_object(object: &mut Map<String, Value>, spec: &RedactionSpec) -> Vec<RedactionInfo> {
    let mut redactions = Vec::new();
    walk_object(object, spec, "", &mut redactions);
    redactions
}

/// Redact a text body holding a JSON object.
///
/// Anything that does not decode to a JSON object is returned unmodified.
pub fn redact_body(body: &TextBody, spec: &RedactionSpec) -> (TextBody, Vec<RedactionInfo>) {
    let charset = Charset::from_label(body.charset.as_deref());
    let Some(mut object) = parse_object(&body.content, charset) else {
        return (body.clone(), Vec::new());
    };

    let redactions = redact_object(&mut object, spec);
    let json = Value::Object(object).to_string();

    let redacted = TextBody {
        content: Bytes::from(charset.encode_json(&json)),
        media_type: Some(
            body.media_type
                .clone()
                .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
        ),
        charset: Some(
            body.charset
                .clone()
                .unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
        ),
    };
    (redacted, redactions)
}

fn parse_object(content: &[u8], charset: Charset) -> Option<Map<String, Value>> {
    let Some(text) = charset.decode(content) else {
        tracing::debug!("Body is not valid {:?} text, leaving it untouched", charset);
        return None;
    };
    match serde_json::from_str(&text) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => {
            tracing::debug!("Body is JSON but not an object, leaving it untouched");
            None
        }
        Err(e) => {
            tracing::debug!("Body is not JSON ({}), leaving it untouched", e);
            None
        }
    }
}

fn walk_object(
    object: &mut Map<String, Value>,
    spec: &RedactionSpec,
    prefix: &str,
    redactions: &mut Vec<RedactionInfo>,
) {
    for (name, value) in object.iter_mut() {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            Value::Object(inner) => walk_object(inner, spec, &path, redactions),
            Value::Array(items) if spec.traverses_arrays() => {
                walk_array(items, spec, &path, redactions)
            }
            Value::String(text) if spec.matches(name) => {
                *text = placeholder(text.as_bytes());
                tracing::debug!("Redacted JSON field {}", path);
                redactions.push(RedactionInfo {
                    location: path,
                    redaction_type: RedactionType::JsonField,
                });
            }
            _ => {}
        }
    }
}

fn walk_array(
    items: &mut [Value],
    spec: &RedactionSpec,
    prefix: &str,
    redactions: &mut Vec<RedactionInfo>,
) {
    for (index, item) in items.iter_mut().enumerate() {
        let path = format!("{}[{}]", prefix, index);
        match item {
            Value::Object(inner) => walk_object(inner, spec, &path, redactions),
            Value::Array(inner) => walk_array(inner, spec, &path, redactions),
            _ => {}
        }
    }
}
