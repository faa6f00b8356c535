//! Redaction pipelines for captured HTTP messages
//!
//! Each pipeline redacts a message body, rebuilds the message around it with
//! the original headers and returns the HTTP message text. The text is handed
//! out as bytes: bodies keep their declared charset, and binary multipart
//! parts pass through untouched.

use scrub_core::{Body, Error, HttpMessage, MultipartBody, Request, Response, Result};
use scrub_security::{RedactionInfo, RedactionSpec, Redactor};
use scrub_wire::{codec, multipart};

/// A rebuilt message plus what was replaced in it
#[derive(Debug, Clone)]
pub struct Redacted {
    pub message: HttpMessage,
    pub redactions: Vec<RedactionInfo>,
}

impl Redacted {
    /// HTTP message text of the rebuilt message
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::serialize(&self.message)
    }
}

pub struct Scrubber {
    redactor: Redactor,
}

impl Scrubber {
    pub fn new(spec: RedactionSpec) -> Self {
        Self {
            redactor: Redactor::new(spec),
        }
    }

    /// Redact JSON fields of a request or response body.
    ///
    /// A message without a body is returned as is.
    pub async fn redact_json_message(&self, message: &HttpMessage) -> Redacted {
        if message.body().is_empty() {
            return Redacted {
                message: message.clone(),
                redactions: Vec::new(),
            };
        }

        let (body, redactions) = self.redactor.redact_json(message.body());
        let rebuilt = rebuild(message, body);

        tracing::info!(
            "Redacted {} JSON field(s) in {:?}",
            redactions.len(),
            message.kind()
        );

        Redacted {
            message: rebuilt,
            redactions,
        }
    }

    /// Replace the image parts of a multipart request.
    ///
    /// The parts are wrapped in a new `multipart/form-data` body with a fresh
    /// boundary. Fails with `Error::NotMultipart` for any other body.
    pub async fn redact_multipart_request(&self, request: &Request) -> Result<Redacted> {
        let Body::Multipart(source) = &request.body else {
            return Err(Error::NotMultipart(format!(
                "{} {} has no multipart body",
                request.method, request.uri
            )));
        };

        let (parts, redactions) = self.redactor.redact_multipart(&source.parts);
        let body = Body::Multipart(MultipartBody::form_data(
            multipart::generate_boundary(),
            parts,
        ));
        let rebuilt = rebuild(&HttpMessage::Request(request.clone()), body);

        tracing::info!(
            "Redacted {} of {} multipart part(s)",
            redactions.len(),
            source.parts.len()
        );

        Ok(Redacted {
            message: rebuilt,
            redactions,
        })
    }

    pub async fn serialize_json_message_redacted(&self, message: &HttpMessage) -> Vec<u8> {
        self.redact_json_message(message).await.to_bytes()
    }

    pub async fn serialize_request_redacted(&self, request: &Request) -> Vec<u8> {
        self.serialize_json_message_redacted(&HttpMessage::Request(request.clone())).await
    }

    pub async fn serialize_response_redacted(&self, response: &Response) -> Vec<u8> {
        self.serialize_json_message_redacted(&HttpMessage::Response(response.clone())).await
    }

    pub async fn serialize_multipart_request_redacted(
        &self,
        request: &Request,
    ) -> Result<Vec<u8>> {
        Ok(self.redact_multipart_request(request).await?.to_bytes())
    }
}

/// Parse message text holding a request
pub async fn deserialize_to_request(text: impl AsRef<[u8]>) -> Result<Request> {
    codec::deserialize_request(text.as_ref())
}

/// Parse message text holding a response
pub async fn deserialize_to_response(text: impl AsRef<[u8]>) -> Result<Response> {
    codec::deserialize_response(text.as_ref())
}

/// Same start line, new body, original headers copied over
fn rebuild(message: &HttpMessage, body: Body) -> HttpMessage {
    let mut rebuilt = message.with_body(body);
    rebuilt.headers_mut().copy_from(message.headers());
    rebuilt
}
