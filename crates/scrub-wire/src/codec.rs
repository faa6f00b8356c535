//! HTTP message text codec
//!
//! Serializes a request or response into the HTTP/1.x wire form and parses it
//! back. When a body is present its `Content-Type` and `Content-Length` are
//! written from the body itself, and on parse they are moved out of the header
//! list into the body, so a message survives the round trip unchanged.
//!
//! The text form is handled as bytes: bodies are copied verbatim, whatever
//! their charset.

use httparse::Status;
use scrub_core::headers::{CONTENT_LENGTH, CONTENT_TYPE};
use scrub_core::{
    Body, Bytes, Error, Headers, HttpMessage, MediaType, MessageKind, Method, Request, Response,
    Result, StatusCode, TextBody, Uri, Version,
};

use crate::multipart;

/// Header slots tried first; a larger head is parsed again with one slot per line
const MAX_HEADERS: usize = 64;

/// Serialize a message to wire bytes
pub fn serialize(message: &HttpMessage) -> Vec<u8> {
    let mut out = Vec::new();

    match message {
        HttpMessage::Request(request) => {
            out.extend_from_slice(
                format!(
                    "{} {} {}\r\n",
                    request.method,
                    request.uri,
                    version_str(request.version)
                )
                .as_bytes(),
            );
        }
        HttpMessage::Response(response) => {
            out.extend_from_slice(
                format!(
                    "{} {} {}\r\n",
                    version_str(response.version),
                    response.status.as_u16(),
                    response.reason_phrase()
                )
                .as_bytes(),
            );
        }
    }

    let body = message.body();
    let content = match body {
        Body::Empty => None,
        Body::Text(text) => Some(text.content.to_vec()),
        Body::Multipart(multipart) => Some(multipart::encode(multipart)),
    };

    for (name, value) in message.headers().iter() {
        let body_owned = name.eq_ignore_ascii_case(CONTENT_TYPE)
            || name.eq_ignore_ascii_case(CONTENT_LENGTH);
        if content.is_some() && body_owned {
            continue;
        }
        write_header(&mut out, name, value);
    }

    if let Some(content) = &content {
        if let Some(media) = body.content_type() {
            write_header(&mut out, CONTENT_TYPE, &media.to_string());
        }
        write_header(&mut out, CONTENT_LENGTH, &content.len().to_string());
    }

    out.extend_from_slice(b"\r\n");
    if let Some(content) = content {
        out.extend_from_slice(&content);
    }
    out
}

/// Parse wire bytes tagged with an `application/http; msgtype=...` media type
pub fn deserialize(bytes: &[u8], media: &MediaType) -> Result<HttpMessage> {
    if media.essence != "application/http" {
        return Err(Error::format(format!(
            "expected application/http content, got {}",
            media.essence
        )));
    }

    match media.param("msgtype").map(str::to_ascii_lowercase).as_deref() {
        Some("request") => parse_request(bytes).map(HttpMessage::Request),
        Some("response") => parse_response(bytes).map(HttpMessage::Response),
        other => Err(Error::format(format!(
            "unsupported msgtype: {}",
            other.unwrap_or("<missing>")
        ))),
    }
}

pub fn deserialize_request(bytes: &[u8]) -> Result<Request> {
    match deserialize(bytes, &MessageKind::Request.media_type())? {
        HttpMessage::Request(request) => Ok(request),
        HttpMessage::Response(_) => Err(Error::format("expected a request")),
    }
}

pub fn deserialize_response(bytes: &[u8]) -> Result<Response> {
    match deserialize(bytes, &MessageKind::Response.media_type())? {
        HttpMessage::Response(response) => Ok(response),
        HttpMessage::Request(_) => Err(Error::format("expected a response")),
    }
}

fn parse_request(bytes: &[u8]) -> Result<Request> {
    let mut slots = MAX_HEADERS;
    loop {
        let mut raw = vec![httparse::EMPTY_HEADER; slots];
        let mut parsed = httparse::Request::new(&mut raw);
        let offset = match parsed.parse(bytes) {
            Err(httparse::Error::TooManyHeaders) if slots < head_lines(bytes) => {
                slots = head_lines(bytes);
                continue;
            }
            status => complete(status)?,
        };
        return build_request(parsed, &bytes[offset..]);
    }
}

fn build_request(parsed: httparse::Request<'_, '_>, rest: &[u8]) -> Result<Request> {
    let method = parsed
        .method
        .ok_or_else(|| Error::format("missing request method"))?;
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|e| Error::format(format!("invalid method {}: {}", method, e)))?;
    let target = parsed
        .path
        .ok_or_else(|| Error::format("missing request target"))?;
    let uri = target
        .parse::<Uri>()
        .map_err(|e| Error::format(format!("invalid request target {}: {}", target, e)))?;
    let version = http_version(parsed.version)?;
    let mut headers = collect_headers(parsed.headers)?;
    let body = read_body(&mut headers, rest)?;

    tracing::debug!("Parsed request {} {}", method, uri);

    Ok(Request {
        method,
        uri,
        version,
        headers,
        body,
    })
}

fn parse_response(bytes: &[u8]) -> Result<Response> {
    let mut slots = MAX_HEADERS;
    loop {
        let mut raw = vec![httparse::EMPTY_HEADER; slots];
        let mut parsed = httparse::Response::new(&mut raw);
        let offset = match parsed.parse(bytes) {
            Err(httparse::Error::TooManyHeaders) if slots < head_lines(bytes) => {
                slots = head_lines(bytes);
                continue;
            }
            status => complete(status)?,
        };
        return build_response(parsed, &bytes[offset..]);
    }
}

fn build_response(parsed: httparse::Response<'_, '_>, rest: &[u8]) -> Result<Response> {
    let code = parsed
        .code
        .ok_or_else(|| Error::format("missing status code"))?;
    let status = StatusCode::from_u16(code)
        .map_err(|e| Error::format(format!("invalid status code {}: {}", code, e)))?;
    let reason = parsed
        .reason
        .filter(|r| !r.is_empty() && Some(*r) != status.canonical_reason())
        .map(str::to_string);
    let version = http_version(parsed.version)?;
    let mut headers = collect_headers(parsed.headers)?;
    let body = read_body(&mut headers, rest)?;

    tracing::debug!("Parsed response {}", status);

    Ok(Response {
        version,
        status,
        reason,
        headers,
        body,
    })
}

/// Lines before the first empty one; never fewer than the headers they hold
pub(crate) fn head_lines(bytes: &[u8]) -> usize {
    bytes
        .split(|b| *b == b'\n')
        .take_while(|line| !line.is_empty() && *line != b"\r")
        .count()
}

fn complete(status: httparse::Result<usize>) -> Result<usize> {
    match status {
        Ok(Status::Complete(offset)) => Ok(offset),
        Ok(Status::Partial) => Err(Error::format("incomplete start line or header block")),
        Err(e) => Err(Error::format(e.to_string())),
    }
}

fn collect_headers(raw: &[httparse::Header<'_>]) -> Result<Headers> {
    let mut headers = Headers::new();
    for header in raw {
        let value = std::str::from_utf8(header.value)
            .map_err(|_| Error::format(format!("non UTF-8 value for header {}", header.name)))?;
        headers.append(header.name, value.trim());
    }
    Ok(headers)
}

/// Cut the body out of the remaining bytes and move its content headers
/// into it. With no body bytes the header list is left as is.
fn read_body(headers: &mut Headers, rest: &[u8]) -> Result<Body> {
    let content = match headers.get(CONTENT_LENGTH) {
        Some(value) => {
            let length: usize = value
                .trim()
                .parse()
                .map_err(|_| Error::format(format!("invalid Content-Length: {}", value)))?;
            rest.get(..length).ok_or_else(|| {
                Error::format(format!(
                    "body has {} bytes, Content-Length says {}",
                    rest.len(),
                    length
                ))
            })?
        }
        None => rest,
    };

    if content.is_empty() {
        return Ok(Body::Empty);
    }

    let media = match headers.get(CONTENT_TYPE) {
        Some(value) => Some(
            MediaType::parse(value)
                .ok_or_else(|| Error::format(format!("invalid Content-Type: {}", value)))?,
        ),
        None => None,
    };
    headers.remove(CONTENT_TYPE);
    headers.remove(CONTENT_LENGTH);

    let content = Bytes::copy_from_slice(content);
    match media {
        Some(media) if media.is_multipart() => {
            let boundary = media
                .boundary()
                .ok_or_else(|| Error::format("multipart Content-Type without boundary"))?;
            Ok(Body::Multipart(multipart::decode(
                &content,
                media.subtype(),
                boundary,
            )?))
        }
        media => Ok(Body::Text(TextBody {
            content,
            charset: media.as_ref().and_then(|m| m.charset()).map(str::to_string),
            media_type: media.map(|m| m.essence),
        })),
    }
}

fn write_header(out: &mut Vec<u8>, name: &str, value: &str) {
    out.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
}

/// The text form is HTTP/1.x only: HTTP/0.9 is written as 1.0 and HTTP/2 and
/// later as 1.1, so whatever is written parses back.
fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 | Version::HTTP_10 => "HTTP/1.0",
        _ => "HTTP/1.1",
    }
}

fn http_version(minor: Option<u8>) -> Result<Version> {
    match minor {
        Some(0) => Ok(Version::HTTP_10),
        Some(1) => Ok(Version::HTTP_11),
        other => Err(Error::format(format!("unsupported HTTP version 1.{:?}", other))),
    }
}
