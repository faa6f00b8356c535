//! JSON encode/decode helpers with per-call settings
//!
//! Settings only affect encoding. Naming (camelCase fields and enum values)
//! is declared on the types with `#[serde(rename_all = "camelCase")]`.
//! Unknown fields are ignored on decode and date strings are never converted
//! implicitly.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Result;

/// Immutable settings passed to every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSettings {
    /// Drop object members whose value is `null` when encoding
    pub omit_nulls: bool,
}

impl Default for JsonSettings {
    fn default() -> Self {
        Self { omit_nulls: true }
    }
}

/// Error details handed to a decode error callback
#[derive(Debug)]
pub struct DecodeError<'a> {
    pub type_name: &'static str,
    pub error: serde_json::Error,
    pub json: &'a str,
}

/// Encode a value to JSON text
pub fn to_json<T: Serialize>(value: &T, settings: &JsonSettings) -> Result<String> {
    let mut tree = serde_json::to_value(value)?;
    if settings.omit_nulls {
        strip_nulls(&mut tree);
    }
    Ok(serde_json::to_string(&tree)?)
}

/// Decode JSON text, never failing past this boundary.
///
/// A decode failure is handed to `on_error` when given, otherwise logged;
/// either way the result is `None`.
pub fn from_json<T: DeserializeOwned>(
    json: Option<&str>,
    on_error: Option<&dyn Fn(&DecodeError<'_>)>,
) -> Option<T> {
    let json = json?;
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(error) => {
            let failure = DecodeError {
                type_name: std::any::type_name::<T>(),
                error,
                json,
            };
            match on_error {
                Some(callback) => callback(&failure),
                None => tracing::warn!("{}: {}", failure.type_name, failure.error),
            }
            None
        }
    }
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
