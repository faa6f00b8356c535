//! Content hashing for placeholder values

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Prefix of every placeholder value
pub const PLACEHOLDER_PREFIX: &str = "image_";

/// Hash arbitrary bytes into a fixed-length printable token.
///
/// BLAKE3 digest (32 bytes) rendered as padded base64, so the token is always
/// 44 characters long.
pub fn content_hash(bytes: &[u8]) -> String {
    BASE64.encode(blake3::hash(bytes).as_bytes())
}

/// Placeholder substituted for redacted content: `image_<hash>`
pub fn placeholder(bytes: &[u8]) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, content_hash(bytes))
}
