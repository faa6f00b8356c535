//! Text encodings for re-emitting JSON bodies

use std::borrow::Cow;

/// Declared charset of a text body.
///
/// Only encodings that can be handled without a transcoding table are
/// distinguished; anything else is read and written as UTF-8 while its label
/// is kept on the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Ascii,
    Latin1,
    Other,
}

impl Charset {
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Charset::Utf8;
        };
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Charset::Utf8,
            "us-ascii" | "ascii" => Charset::Ascii,
            "iso-8859-1" | "latin1" | "l1" | "iso_8859-1" => Charset::Latin1,
            _ => Charset::Other,
        }
    }

    /// Decode body bytes. `None` when the bytes are not valid in this charset.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Charset::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| b as char).collect())),
            Charset::Ascii if !bytes.is_ascii() => None,
            _ => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
        }
    }

    /// Encode serialized JSON text.
    ///
    /// Characters the charset cannot carry are written as `\uXXXX` escapes.
    /// In serialized JSON every non-ASCII character sits inside a string
    /// literal, so the escape is always valid there.
    pub fn encode_json(&self, json: &str) -> Vec<u8> {
        let limit = match self {
            Charset::Ascii => 0x7f,
            Charset::Latin1 => 0xff,
            Charset::Utf8 | Charset::Other => return json.as_bytes().to_vec(),
        };

        let mut out = Vec::with_capacity(json.len());
        for c in json.chars() {
            let code = c as u32;
            if code <= limit {
                out.push(code as u8);
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.extend_from_slice(format!("\\u{:04x}", unit).as_bytes());
                }
            }
        }
        out
    }
}
