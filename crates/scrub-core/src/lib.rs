//! Core model and primitives for scrub
//!
//! This crate contains:
//! - HTTP message model (requests, responses, bodies, multipart parts)
//! - Header, media type and charset handling
//! - Content hashing for placeholder values
//! - JSON encode/decode helpers

pub mod charset;
pub mod error;
pub mod hash;
pub mod headers;
pub mod json;
pub mod media;
pub mod message;

pub use charset::Charset;
pub use error::{Error, Result};
pub use hash::{PLACEHOLDER_PREFIX, content_hash, placeholder};
pub use headers::Headers;
pub use json::JsonSettings;
pub use media::{ContentDisposition, MediaType};
pub use message::{
    Body, HttpMessage, MessageKind, MultipartBody, Part, Request, Response, TextBody,
};

pub use bytes::Bytes;
pub use http::{Method, StatusCode, Uri, Version};
