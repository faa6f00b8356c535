use anyhow::{Context, Result};
use scrub_config::Config;
use scrub_core::HttpMessage;
use scrub_engine::{Redacted, Scrubber};
use scrub_security::RedactionSpec;
use scrub_wire::codec;

use super::{read_input, write_output};

pub async fn request(input: &str, fields: Vec<String>, config: &Config) -> Result<()> {
    let bytes = read_input(input).await?;
    let request = codec::deserialize_request(&bytes)
        .with_context(|| format!("{} does not hold an HTTP request", input))?;

    let scrubber = Scrubber::new(redaction_spec(fields, config));
    let redacted = scrubber.redact_json_message(&request.into()).await;
    emit(&redacted).await
}

pub async fn response(input: &str, fields: Vec<String>, config: &Config) -> Result<()> {
    let bytes = read_input(input).await?;
    let response = codec::deserialize_response(&bytes)
        .with_context(|| format!("{} does not hold an HTTP response", input))?;

    let scrubber = Scrubber::new(redaction_spec(fields, config));
    let redacted = scrubber.redact_json_message(&response.into()).await;
    emit(&redacted).await
}

pub async fn multipart(input: &str, config: &Config) -> Result<()> {
    let bytes = read_input(input).await?;
    let request = codec::deserialize_request(&bytes)
        .with_context(|| format!("{} does not hold an HTTP request", input))?;

    let scrubber = Scrubber::new(config.redaction.spec());
    let redacted = scrubber.redact_multipart_request(&request).await?;
    emit(&redacted).await
}

/// Fields given on the command line replace the configured list
fn redaction_spec(fields: Vec<String>, config: &Config) -> RedactionSpec {
    if fields.is_empty() {
        config.redaction.spec()
    } else {
        RedactionSpec::new(fields).with_array_traversal(config.redaction.traverse_arrays)
    }
}

/// Print the rebuilt message on stdout and the redaction list on stderr
async fn emit(redacted: &Redacted) -> Result<()> {
    write_output(&redacted.to_bytes()).await?;

    let kind = match &redacted.message {
        HttpMessage::Request(_) => "request",
        HttpMessage::Response(_) => "response",
    };
    if redacted.redactions.is_empty() {
        eprintln!("No values redacted in {}", kind);
    } else {
        eprintln!("✓ Redacted {} value(s) in {}", redacted.redactions.len(), kind);
        for info in &redacted.redactions {
            eprintln!("  {} ({:?})", info.location, info.redaction_type);
        }
    }
    Ok(())
}
