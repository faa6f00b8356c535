//! Wire format for captured HTTP messages
//!
//! - `codec`: HTTP/1.x message text (start line, headers, blank line, body)
//! - `multipart`: MIME multipart bodies (RFC 2046)

pub mod codec;
pub mod multipart;

pub use codec::{deserialize, deserialize_request, deserialize_response, serialize};
