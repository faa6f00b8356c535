//! Redaction of HTTP message bodies
//!
//! - JSON bodies: string members with a configured name are replaced
//! - Multipart bodies: image parts are replaced by a placeholder part
//!
//! Replacement values come from `scrub_core::placeholder`, so the same input
//! always yields the same output.

pub mod json;
pub mod multipart;
pub mod redactor;
pub mod spec;

pub use redactor::{RedactionInfo, RedactionType, Redactor};
pub use spec::RedactionSpec;
