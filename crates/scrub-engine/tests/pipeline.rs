use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use scrub_core::json::{JsonSettings, from_json, to_json};
use scrub_core::{
    Body, Bytes, Charset, ContentDisposition, Error, MediaType, Method, MultipartBody, Part,
    Request, Response, StatusCode, TextBody, Uri, placeholder,
};
use scrub_engine::{Scrubber, deserialize_to_request, deserialize_to_response};
use scrub_security::RedactionSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestRequest {
    transaction_id: i64,
    picture: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestResponse {
    transaction_id: i64,
    status: u16,
    picture: Option<String>,
}

/// Deterministic stand-in for a JPEG file
fn image_bytes(len: usize) -> Vec<u8> {
    let mut bytes: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
    bytes[..3].copy_from_slice(&[0xff, 0xd8, 0xff]);
    bytes
}

fn scrubber() -> Scrubber {
    Scrubber::new(RedactionSpec::new(["picture"]))
}

fn json_request(content: String) -> Request {
    Request::new(Method::POST, Uri::from_static("http://api.example.com/api/test"))
        .with_header("Authorization", "Bearer 123")
        .with_body(Body::json(content))
}

fn multipart_request(image_len: usize) -> Request {
    let parts = vec![
        Part::new(image_bytes(image_len))
            .with_content_type(&MediaType::new("image/jpeg"))
            .with_disposition(
                &ContentDisposition::form_data("Selfie").with_filename(Some("Selfie".into())),
            ),
        Part::new("Ruddy")
            .with_content_type(&MediaType::new("text/plain").with_param("charset", "utf-8"))
            .with_disposition(&ContentDisposition::form_data("Name")),
        Part::new("12345")
            .with_content_type(&MediaType::new("text/plain").with_param("charset", "utf-8"))
            .with_disposition(&ContentDisposition::form_data("TransactionId")),
    ];
    Request::new(Method::POST, Uri::from_static("http://api.example.com/api/test"))
        .with_header("Authorization", "Bearer 123")
        .with_body(Body::Multipart(MultipartBody::form_data("b4d49894", parts)))
}

fn as_text(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap()
}

fn json_content(body: &Body) -> String {
    match body {
        Body::Text(text) => String::from_utf8(text.content.to_vec()).unwrap(),
        other => panic!("expected text body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_round_trip() {
    let picture = BASE64.encode(image_bytes(4096));
    let payload = TestRequest {
        transaction_id: 1111,
        picture: Some(picture.clone()),
    };
    let request = json_request(to_json(&payload, &JsonSettings::default()).unwrap());

    let text = scrubber().serialize_request_redacted(&request).await;
    assert!(!as_text(&text).contains(&picture));

    let parsed = deserialize_to_request(&text).await.unwrap();
    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.uri, "http://api.example.com/api/test");
    assert_eq!(parsed.headers.get("Authorization"), Some("Bearer 123"));

    let json = json_content(&parsed.body);
    let decoded: TestRequest = from_json(Some(json.as_str()), None).unwrap();
    assert_eq!(decoded.transaction_id, 1111);
    let redacted = decoded.picture.unwrap();
    assert!(redacted.starts_with("image_"));
    assert_eq!(redacted, placeholder(picture.as_bytes()));
}

#[tokio::test]
async fn test_response_round_trip() {
    let payload = TestResponse {
        transaction_id: 1111,
        status: 200,
        picture: Some(BASE64.encode(image_bytes(4096))),
    };
    let response = Response::new(StatusCode::OK)
        .with_body(Body::json(to_json(&payload, &JsonSettings::default()).unwrap()));

    let text = scrubber().serialize_response_redacted(&response).await;
    let parsed = deserialize_to_response(&text).await.unwrap();
    assert_eq!(parsed.status, StatusCode::OK);

    let json = json_content(&parsed.body);
    let decoded: TestResponse = from_json(Some(json.as_str()), None).unwrap();
    assert_eq!(decoded.status, 200);
    assert!(decoded.picture.unwrap().starts_with("image_"));
}

#[tokio::test]
async fn test_concrete_json_scenario() {
    let picture = BASE64.encode(b"orange cat");
    let request = json_request(format!(
        r#"{{"transactionId":1111,"picture":"{}"}}"#,
        picture
    ));

    let text = scrubber().serialize_request_redacted(&request).await;
    let expected = format!(
        r#"{{"transactionId":1111,"picture":"{}"}}"#,
        placeholder(picture.as_bytes())
    );
    assert!(text.ends_with(format!("\r\n\r\n{}", expected).as_bytes()));
}

#[tokio::test]
async fn test_json_redaction_is_deterministic() {
    let request = json_request(r#"{"picture":"abc","nested":{"picture":"def"}}"#.to_string());
    let scrubber = scrubber();

    let first = scrubber.serialize_request_redacted(&request).await;
    let second = scrubber.serialize_request_redacted(&request).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_non_json_body_passes_through() {
    let form = "name=Ruddy&transactionId=12345";
    let request = Request::new(Method::POST, Uri::from_static("/form")).with_body(Body::Text(
        TextBody {
            content: form.into(),
            media_type: Some("application/x-www-form-urlencoded".to_string()),
            charset: None,
        },
    ));

    let text = scrubber().serialize_request_redacted(&request).await;
    let parsed = deserialize_to_request(&text).await.unwrap();
    assert_eq!(parsed.body, request.body);
}

#[tokio::test]
async fn test_header_copy_does_not_accumulate() {
    let request = json_request(r#"{"picture":"abc"}"#.to_string())
        .with_header("Accept", "application/json")
        .with_header("Accept", "text/plain");

    let once = scrubber().serialize_request_redacted(&request).await;
    let once = deserialize_to_request(&once).await.unwrap();
    let twice = scrubber().serialize_request_redacted(&once).await;
    let twice = deserialize_to_request(&twice).await.unwrap();

    assert_eq!(once.headers, twice.headers);
    assert_eq!(twice.headers.get_all("accept").count(), 2);
    assert_eq!(twice.headers.get_all("authorization").count(), 1);
}

#[tokio::test]
async fn test_multipart_request_shrinks() {
    let request = multipart_request(50 * 1024);
    let Body::Multipart(original) = &request.body else {
        unreachable!()
    };
    let original_length = scrub_wire::multipart::encode(original).len();

    let text = scrubber()
        .serialize_multipart_request_redacted(&request)
        .await
        .unwrap();
    assert!(text.len() < original_length / 10);

    let parsed = deserialize_to_request(&text).await.unwrap();
    let Body::Multipart(redacted) = parsed.body else {
        panic!("expected multipart body");
    };
    assert_eq!(redacted.subtype, "form-data");
    assert_ne!(redacted.boundary, "b4d49894");

    let names: Vec<_> = redacted
        .parts
        .iter()
        .map(|p| p.disposition().unwrap().name.unwrap())
        .collect();
    assert_eq!(names, ["Selfie", "Name", "TransactionId"]);

    assert_eq!(
        redacted.parts[0].payload,
        placeholder(&image_bytes(50 * 1024))
    );
    assert_eq!(redacted.parts[0].headers.get("Content-Type"), Some("image/jpeg"));
    assert_eq!(redacted.parts[1], original.parts[1]);
    assert_eq!(redacted.parts[2], original.parts[2]);
    assert_eq!(parsed.headers.get("Authorization"), Some("Bearer 123"));
}

#[tokio::test]
async fn test_binary_part_survives_round_trip() {
    let pdf = Part::new(Bytes::from_static(&[0x25, 0x50, 0x44, 0x46, 0xe2, 0xe3, 0xcf, 0xd3]))
        .with_content_type(&MediaType::new("application/pdf"))
        .with_disposition(
            &ContentDisposition::form_data("Contract").with_filename(Some("contract.pdf".into())),
        );
    let mut request = multipart_request(4096);
    if let Body::Multipart(body) = &mut request.body {
        body.parts.push(pdf.clone());
    }

    let text = scrubber()
        .serialize_multipart_request_redacted(&request)
        .await
        .unwrap();
    let parsed = deserialize_to_request(&text).await.unwrap();

    let Body::Multipart(redacted) = parsed.body else {
        panic!("expected multipart body");
    };
    assert_eq!(redacted.parts.len(), 4);
    assert_eq!(redacted.parts[0].payload, placeholder(&image_bytes(4096)));
    assert_eq!(redacted.parts[3], pdf);
    assert_eq!(
        redacted.parts[3].payload[..],
        [0x25, 0x50, 0x44, 0x46, 0xe2, 0xe3, 0xcf, 0xd3]
    );
}

#[tokio::test]
async fn test_latin1_request_round_trip() {
    let request = Request::new(Method::POST, Uri::from_static("/api/test")).with_body(Body::Text(
        TextBody {
            content: Bytes::from_static(b"{\"picture\":\"abc\",\"name\":\"Ren\xe9\"}"),
            media_type: Some("application/json".to_string()),
            charset: Some("iso-8859-1".to_string()),
        },
    ));

    let text = scrubber().serialize_request_redacted(&request).await;
    let parsed = deserialize_to_request(&text).await.unwrap();

    let Body::Text(body) = parsed.body else {
        panic!("expected text body");
    };
    assert_eq!(body.charset.as_deref(), Some("iso-8859-1"));
    assert!(body.content.ends_with(b"\"name\":\"Ren\xe9\"}"));

    let json = Charset::Latin1.decode(&body.content).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Ren\u{e9}");
    assert_eq!(value["picture"], placeholder(b"abc"));
}

#[tokio::test]
async fn test_numbers_survive_redaction() {
    let request = json_request(
        r#"{"id":123456789012345678901234567890,"amount":1.10,"picture":"abc"}"#.to_string(),
    );

    let text = scrubber().serialize_request_redacted(&request).await;
    let parsed = deserialize_to_request(&text).await.unwrap();

    let expected = format!(
        r#"{{"id":123456789012345678901234567890,"amount":1.10,"picture":"{}"}}"#,
        placeholder(b"abc")
    );
    assert_eq!(json_content(&parsed.body), expected);
}

#[tokio::test]
async fn test_multipart_from_wire_text() {
    let raw = "POST /upload HTTP/1.1\r\n\
               Host: api.example.com\r\n\
               Content-Type: multipart/form-data; boundary=XyZ\r\n\
               \r\n\
               --XyZ\r\n\
               Content-Type: image/png\r\n\
               \r\n\
               not really a png\r\n\
               --XyZ\r\n\
               Content-Disposition: form-data; name=\"note\"\r\n\
               \r\n\
               hello\r\n\
               --XyZ--\r\n";

    let request = deserialize_to_request(raw).await.unwrap();
    let text = scrubber()
        .serialize_multipart_request_redacted(&request)
        .await
        .unwrap();
    let parsed = deserialize_to_request(&text).await.unwrap();

    let Body::Multipart(body) = parsed.body else {
        panic!("expected multipart body");
    };
    assert_eq!(body.parts.len(), 2);
    let image = body.parts[0].disposition().unwrap();
    assert_eq!(image.disposition, "form-data");
    assert_eq!(image.name.as_deref(), Some("Name"));
    assert_eq!(body.parts[0].payload, placeholder(b"not really a png"));
    assert_eq!(body.parts[1].payload, "hello");
    assert_eq!(parsed.headers.get("Host"), Some("api.example.com"));
}

#[tokio::test]
async fn test_malformed_text_is_an_error() {
    let result = deserialize_to_request("this is not http").await;
    assert!(matches!(result, Err(Error::Format(_))));

    let result = deserialize_to_response("GET / HTTP/1.1\r\n\r\n").await;
    assert!(matches!(result, Err(Error::Format(_))));
}

#[tokio::test]
async fn test_message_without_body() {
    let parsed = deserialize_to_request("GET /api/test HTTP/1.1\r\nHost: api.example.com\r\n\r\n")
        .await
        .unwrap();
    assert!(parsed.body.is_empty());

    let text = scrubber().serialize_request_redacted(&parsed).await;
    assert_eq!(
        as_text(&text),
        "GET /api/test HTTP/1.1\r\nHost: api.example.com\r\n\r\n"
    );
}
