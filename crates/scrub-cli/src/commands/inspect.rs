use anyhow::{Context, Result};
use scrub_config::Config;
use scrub_core::json::to_json;
use scrub_core::{Body, HttpMessage, MessageKind, Part};
use scrub_wire::{codec, multipart};
use serde::Serialize;

use super::read_input;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageSummary {
    start_line: String,
    headers: Vec<HeaderSummary>,
    body: BodySummary,
}

#[derive(Debug, Serialize)]
struct HeaderSummary {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BodySummary {
    kind: BodyKind,
    content_type: Option<String>,
    length: usize,
    parts: Option<Vec<PartSummary>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
enum BodyKind {
    Empty,
    Text,
    Multipart,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PartSummary {
    name: Option<String>,
    filename: Option<String>,
    content_type: Option<String>,
    size: usize,
}

pub async fn handle(input: &str, response: bool, config: &Config) -> Result<()> {
    let bytes = read_input(input).await?;
    let kind = if response {
        MessageKind::Response
    } else {
        MessageKind::Request
    };
    let message = codec::deserialize(&bytes, &kind.media_type())
        .with_context(|| format!("Failed to parse {}", input))?;

    println!("{}", to_json(&summarize(&message), &config.json.settings())?);
    Ok(())
}

fn summarize(message: &HttpMessage) -> MessageSummary {
    let start_line = match message {
        HttpMessage::Request(r) => format!("{} {} {:?}", r.method, r.uri, r.version),
        HttpMessage::Response(r) => {
            format!("{:?} {} {}", r.version, r.status.as_u16(), r.reason_phrase())
        }
    };

    let headers = message
        .headers()
        .iter()
        .map(|(name, value)| HeaderSummary {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect();

    let body = message.body();
    let content_type = body.content_type().map(|m| m.to_string());
    let body = match body {
        Body::Empty => BodySummary {
            kind: BodyKind::Empty,
            content_type,
            length: 0,
            parts: None,
        },
        Body::Text(text) => BodySummary {
            kind: BodyKind::Text,
            content_type,
            length: text.content.len(),
            parts: None,
        },
        Body::Multipart(body) => BodySummary {
            kind: BodyKind::Multipart,
            content_type,
            length: multipart::encode(body).len(),
            parts: Some(body.parts.iter().map(summarize_part).collect()),
        },
    };

    MessageSummary {
        start_line,
        headers,
        body,
    }
}

fn summarize_part(part: &Part) -> PartSummary {
    let disposition = part.disposition();
    PartSummary {
        name: disposition.as_ref().and_then(|d| d.name.clone()),
        filename: disposition.and_then(|d| d.filename),
        content_type: part.content_type().map(|m| m.to_string()),
        size: part.payload.len(),
    }
}
