//! HTTP message model
//!
//! Messages are plain data with fully buffered bodies. `Content-Type` and
//! `Content-Length` of a message with a body are owned by the [`Body`]; the
//! header list carries everything else.

use bytes::Bytes;
use http::{Method, StatusCode, Uri, Version};

use crate::headers::{CONTENT_DISPOSITION, CONTENT_TYPE, Headers};
use crate::media::{ContentDisposition, MediaType};

/// Which kind of message a piece of wire text holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
}

impl MessageKind {
    /// Media type marker for an HTTP message of this kind
    pub fn media_type(&self) -> MediaType {
        let msgtype = match self {
            MessageKind::Request => "request",
            MessageKind::Response => "response",
        };
        MediaType::new("application/http").with_param("msgtype", msgtype)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HttpMessage {
    Request(Request),
    Response(Response),
}

impl HttpMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            HttpMessage::Request(_) => MessageKind::Request,
            HttpMessage::Response(_) => MessageKind::Response,
        }
    }

    pub fn headers(&self) -> &Headers {
        match self {
            HttpMessage::Request(r) => &r.headers,
            HttpMessage::Response(r) => &r.headers,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            HttpMessage::Request(r) => &r.body,
            HttpMessage::Response(r) => &r.body,
        }
    }

    /// Same start line with an empty header list and the given body
    pub fn with_body(&self, body: Body) -> Self {
        match self {
            HttpMessage::Request(r) => HttpMessage::Request(Request {
                headers: Headers::new(),
                body,
                ..r.clone_head()
            }),
            HttpMessage::Response(r) => HttpMessage::Response(Response {
                headers: Headers::new(),
                body,
                ..r.clone_head()
            }),
        }
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        match self {
            HttpMessage::Request(r) => &mut r.headers,
            HttpMessage::Response(r) => &mut r.headers,
        }
    }
}

impl From<Request> for HttpMessage {
    fn from(request: Request) -> Self {
        HttpMessage::Request(request)
    }
}

impl From<Response> for HttpMessage {
    fn from(response: Response) -> Self {
        HttpMessage::Response(response)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub uri: Uri,
    /// Only HTTP/1.0 and 1.1 have a text form; other versions are written as
    /// the nearest of the two
    pub version: Version,
    pub headers: Headers,
    pub body: Body,
}

impl Request {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            version: Version::HTTP_11,
            headers: Headers::new(),
            body: Body::Empty,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    fn clone_head(&self) -> Self {
        Self {
            method: self.method.clone(),
            uri: self.uri.clone(),
            version: self.version,
            headers: Headers::new(),
            body: Body::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Written as HTTP/1.0 or 1.1, like [`Request::version`]
    pub version: Version,
    pub status: StatusCode,
    /// Reason phrase as received; the canonical phrase is used when absent
    pub reason: Option<String>,
    pub headers: Headers,
    pub body: Body,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: Version::HTTP_11,
            status,
            reason: None,
            headers: Headers::new(),
            body: Body::Empty,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn reason_phrase(&self) -> &str {
        self.reason
            .as_deref()
            .or_else(|| self.status.canonical_reason())
            .unwrap_or("")
    }

    fn clone_head(&self) -> Self {
        Self {
            version: self.version,
            status: self.status,
            reason: self.reason.clone(),
            headers: Headers::new(),
            body: Body::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Text(TextBody),
    Multipart(MultipartBody),
}

impl Body {
    /// Text body tagged `application/json; charset=utf-8`
    pub fn json(content: impl Into<Bytes>) -> Self {
        Body::Text(TextBody {
            content: content.into(),
            media_type: Some("application/json".to_string()),
            charset: Some("utf-8".to_string()),
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// Value of the `Content-Type` header this body is sent with
    pub fn content_type(&self) -> Option<MediaType> {
        match self {
            Body::Empty => None,
            Body::Text(text) => text.content_type(),
            Body::Multipart(multipart) => Some(multipart.content_type()),
        }
    }
}

/// Any non-multipart body: raw bytes plus the declared type
#[derive(Debug, Clone, PartialEq)]
pub struct TextBody {
    pub content: Bytes,
    pub media_type: Option<String>,
    pub charset: Option<String>,
}

impl TextBody {
    pub fn content_type(&self) -> Option<MediaType> {
        let media = MediaType::new(self.media_type.as_deref()?);
        Some(match &self.charset {
            Some(charset) => media.with_param("charset", charset.clone()),
            None => media,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    /// e.g. `form-data`
    pub subtype: String,
    pub boundary: String,
    pub parts: Vec<Part>,
}

impl MultipartBody {
    pub fn form_data(boundary: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            subtype: "form-data".to_string(),
            boundary: boundary.into(),
            parts,
        }
    }

    pub fn content_type(&self) -> MediaType {
        MediaType::new(&format!("multipart/{}", self.subtype))
            .with_param("boundary", self.boundary.clone())
    }
}

/// One section of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub headers: Headers,
    pub payload: Bytes,
}

impl Part {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            headers: Headers::new(),
            payload: payload.into(),
        }
    }

    pub fn with_content_type(mut self, media: &MediaType) -> Self {
        self.headers.set(CONTENT_TYPE, media.to_string());
        self
    }

    pub fn with_disposition(mut self, disposition: &ContentDisposition) -> Self {
        self.headers.set(CONTENT_DISPOSITION, disposition.to_string());
        self
    }

    pub fn content_type(&self) -> Option<MediaType> {
        self.headers.get(CONTENT_TYPE).and_then(MediaType::parse)
    }

    pub fn disposition(&self) -> Option<ContentDisposition> {
        self.headers
            .get(CONTENT_DISPOSITION)
            .and_then(ContentDisposition::parse)
    }
}
