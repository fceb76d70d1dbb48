use labserver::http::response::{Body, Response, ResponseBuilder, StatusCode};
use labserver::http::writer::{ResponseWriter, serialize_head};
use std::time::{Duration, SystemTime};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotModified.as_u16(), 304);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotModified.reason_phrase(), "Not Modified");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
}

#[test]
fn test_response_builder_general_headers_order() {
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
    let response = ResponseBuilder::new(StatusCode::Ok)
        .general_headers("Labbserver", now)
        .header("Content-Length", "3")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["Date", "Server", "Allow", "Content-Length"]);
    assert_eq!(response.header("date"), Some("Sun, 06 Nov 1994 08:49:37 GMT"));
    assert_eq!(response.header("Allow"), Some("GET HEAD"));
}

#[test]
fn test_response_builder_replaces_header_in_place() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers.len(), 2);
    assert_eq!(response.headers[0].1, "text/html");
}

#[test]
fn test_response_builder_has_no_automatic_content_length() {
    let response = ResponseBuilder::new(StatusCode::NotModified).build();

    assert!(response.header("Content-Length").is_none());
    assert!(response.body.is_empty());
}

#[test]
fn test_error_response_has_html_body_and_no_entity_headers() {
    let response = Response::error(StatusCode::NotFound, "Labbserver", false);

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.header("Content-Length").is_none());
    assert!(response.header("Content-Type").is_none());
    assert_eq!(response.header("Server"), Some("Labbserver"));
    match response.body {
        Body::Bytes(ref b) => assert_eq!(b.as_slice(), b"<h1>404 Not Found</h1>"),
        ref other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn test_error_response_for_head_has_no_body() {
    let response = Response::error(StatusCode::BadRequest, "Labbserver", true);
    assert!(response.body.is_empty());
}

#[test]
fn test_serialize_head_layout() {
    let response = ResponseBuilder::new(StatusCode::NotImplemented)
        .header("Server", "Labbserver")
        .build();

    let head = serialize_head(&response);
    assert_eq!(
        head,
        b"HTTP/1.0 501 Not Implemented\r\nServer: Labbserver\r\n\r\n".to_vec()
    );
}

#[tokio::test]
async fn test_writer_sends_head_then_body() {
    let response = ResponseBuilder::new(StatusCode::BadRequest)
        .header("Server", "x")
        .body(Body::Bytes(b"<h1>400 Bad Request</h1>".to_vec()))
        .build();

    let mut out = Vec::new();
    let mut writer = ResponseWriter::new(response);
    writer.write_to_stream(&mut out).await.unwrap();

    let expected = b"HTTP/1.0 400 Bad Request\r\nServer: x\r\n\r\n<h1>400 Bad Request</h1>";
    assert_eq!(out, expected.to_vec());
    assert_eq!(writer.written(), expected.len());
}

#[tokio::test]
async fn test_writer_streams_file_body() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.bin");
    let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, &data).unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(Body::File {
            file,
            len: data.len() as u64,
        })
        .build();

    let mut out = Vec::new();
    ResponseWriter::new(response)
        .write_to_stream(&mut out)
        .await
        .unwrap();

    let head = b"HTTP/1.0 200 OK\r\n\r\n";
    assert_eq!(&out[..head.len()], head);
    assert_eq!(&out[head.len()..], data.as_slice());
}

#[tokio::test]
async fn test_writer_stops_at_declared_file_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("growing.log");
    std::fs::write(&path, b"0123456789").unwrap();

    // The file grew after its length was recorded
    let file = tokio::fs::File::open(&path).await.unwrap();
    std::fs::write(&path, b"0123456789abcdef").unwrap();

    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "10")
        .body(Body::File { file, len: 10 })
        .build();

    let mut out = Vec::new();
    let mut writer = ResponseWriter::new(response);
    writer.write_to_stream(&mut out).await.unwrap();

    let head = b"HTTP/1.0 200 OK\r\nContent-Length: 10\r\n\r\n";
    assert_eq!(&out[..head.len()], head);
    assert_eq!(&out[head.len()..], b"0123456789");
    assert_eq!(writer.written(), head.len() + 10);
}
