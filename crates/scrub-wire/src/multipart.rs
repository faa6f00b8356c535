//! MIME multipart bodies

use httparse::Status;
use scrub_core::{Bytes, Error, Headers, MultipartBody, Part, Result};

use crate::codec::head_lines;

/// Header slots tried first for each part
const MAX_PART_HEADERS: usize = 32;

/// Fresh boundary for a newly built multipart body
pub fn generate_boundary() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Write parts with `--boundary` delimiters and a closing `--boundary--`
pub fn encode(body: &MultipartBody) -> Vec<u8> {
    let delimiter = format!("--{}", body.boundary);
    let mut out = Vec::new();

    for part in &body.parts {
        out.extend_from_slice(delimiter.as_bytes());
        out.extend_from_slice(b"\r\n");
        for (name, value) in part.headers.iter() {
            out.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&part.payload);
        out.extend_from_slice(b"\r\n");
    }

    out.extend_from_slice(delimiter.as_bytes());
    out.extend_from_slice(b"--\r\n");
    out
}

/// Split a multipart body into its parts.
///
/// Preamble and epilogue are discarded. Delimiters must start a line; both
/// CRLF and bare LF line breaks are accepted.
pub fn decode(bytes: &Bytes, subtype: &str, boundary: &str) -> Result<MultipartBody> {
    let delimiter = format!("--{}", boundary);
    let delimiter = delimiter.as_bytes();

    let (_, mut pos) = next_delimiter(bytes, delimiter, 0)
        .ok_or_else(|| Error::format(format!("multipart boundary '{}' not found", boundary)))?;

    let mut parts = Vec::new();
    loop {
        let rest = &bytes[pos..];
        if rest.starts_with(b"--") {
            break;
        }
        pos += skip_line_break(rest)
            .ok_or_else(|| Error::format("multipart delimiter not followed by a line break"))?;

        let (part_end, after) = next_delimiter(bytes, delimiter, pos)
            .ok_or_else(|| Error::format("multipart body has no closing delimiter"))?;
        parts.push(decode_part(bytes.slice(pos..part_end))?);
        pos = after;
    }

    tracing::debug!("Decoded multipart body with {} parts", parts.len());

    Ok(MultipartBody {
        subtype: subtype.to_string(),
        boundary: boundary.to_string(),
        parts,
    })
}

fn decode_part(bytes: Bytes) -> Result<Part> {
    if bytes.is_empty() {
        return Ok(Part::new(bytes));
    }

    let mut slots = MAX_PART_HEADERS;
    loop {
        let mut raw = vec![httparse::EMPTY_HEADER; slots];
        let (offset, parsed) = match httparse::parse_headers(&bytes, &mut raw) {
            Ok(Status::Complete(done)) => done,
            Ok(Status::Partial) => return Err(Error::format("incomplete multipart part headers")),
            Err(httparse::Error::TooManyHeaders) if slots < head_lines(&bytes) => {
                slots = head_lines(&bytes);
                continue;
            }
            Err(e) => {
                return Err(Error::format(format!("invalid multipart part headers: {}", e)));
            }
        };
        return Ok(Part {
            headers: collect_headers(parsed)?,
            payload: bytes.slice(offset..),
        });
    }
}

fn collect_headers(parsed: &[httparse::Header<'_>]) -> Result<Headers> {
    let mut headers = Headers::new();
    for header in parsed {
        let value = std::str::from_utf8(header.value).map_err(|_| {
            Error::format(format!("non UTF-8 value for part header {}", header.name))
        })?;
        headers.append(header.name, value.trim());
    }
    Ok(headers)
}

/// Find the next delimiter that starts a line at or after `from`.
///
/// Returns where the preceding part ends (before its trailing line break) and
/// the index right after the delimiter.
fn next_delimiter(bytes: &[u8], delimiter: &[u8], from: usize) -> Option<(usize, usize)> {
    let mut search = from;
    while let Some(offset) = find(&bytes[search..], delimiter) {
        let start = search + offset;
        if start == 0 || bytes[start - 1] == b'\n' {
            let mut part_end = start;
            if part_end > from && bytes[part_end - 1] == b'\n' {
                part_end -= 1;
                if part_end > from && bytes[part_end - 1] == b'\r' {
                    part_end -= 1;
                }
            }
            return Some((part_end, start + delimiter.len()));
        }
        search = start + 1;
    }
    None
}

/// Length of optional padding plus the line break, if `rest` starts with one
fn skip_line_break(rest: &[u8]) -> Option<usize> {
    let padding = rest.iter().take_while(|b| **b == b' ' || **b == b'\t').count();
    match &rest[padding..] {
        [b'\r', b'\n', ..] => Some(padding + 2),
        [b'\n', ..] => Some(padding + 1),
        _ => None,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
