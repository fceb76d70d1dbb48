use labserver::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

#[test]
fn test_request_header_retrieval() {
    let mut headers = HashMap::new();
    headers.insert("host".to_string(), "example.com".to_string());
    headers.insert("user-agent".to_string(), "curl".to_string());

    let req = Request {
        method: Method::GET,
        path: "/".to_string(),
        version: "HTTP/1.0".to_string(),
        headers,
    };

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("USER-AGENT"), Some("curl"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_builder_defaults_to_http10() {
    let req = RequestBuilder::new()
        .method(Method::HEAD)
        .path("/")
        .build()
        .unwrap();

    assert_eq!(req.version, "HTTP/1.0");
    assert!(req.is_head());
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_request_if_modified_since_parsed() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("If-Modified-Since", "Sun, 06 Nov 1994 08:49:37 GMT")
        .build()
        .unwrap();

    let expected = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
    assert_eq!(req.if_modified_since(), Some(expected));
}

#[test]
fn test_request_if_modified_since_invalid() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("If-Modified-Since", "yesterday")
        .build()
        .unwrap();

    assert_eq!(req.if_modified_since(), None);
}

#[test]
fn test_request_if_modified_since_missing() {
    let req = RequestBuilder::new().method(Method::GET).path("/").build().unwrap();
    assert_eq!(req.if_modified_since(), None);
}

#[test]
fn test_request_method_from_token() {
    assert_eq!(Method::from_token("GET"), Method::GET);
    assert_eq!(Method::from_token("HEAD"), Method::HEAD);
    assert_eq!(Method::from_token("POST"), Method::POST);
    assert_eq!(Method::from_token("get"), Method::Other("get".to_string())); // Case-sensitive
    assert_eq!(Method::from_token("DELETE").as_str(), "DELETE");
}
