use static_httpd::error::HttpError;
use static_httpd::http::parser::parse_request;
use static_httpd::http::request::Method;
use static_httpd::http::response::StatusCode;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/");
}

#[test]
fn test_parse_head_request() {
    let req = b"HEAD /style.css HTTP/1.1\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method, Method::HEAD);
    assert_eq!(parsed.target, "/style.css");
}

#[test]
fn test_parse_ignores_headers() {
    let req = b"GET /path HTTP/1.1\r\nBrokenHeader\r\nContent-Length: nope\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.target, "/path");
}

#[test]
fn test_parse_keeps_query_string_in_target() {
    let req = b"GET /search?q=rust HTTP/1.1\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.target, "/search?q=rust");
}

#[test]
fn test_parse_percent_decodes_target() {
    let req = b"GET /my%20docs/caf%C3%A9.html HTTP/1.1\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.target, "/my docs/café.html");
}

#[test]
fn test_parse_decoded_traversal_is_left_for_resolver() {
    let req = b"GET /%2e%2e/%2e%2e/etc/passwd HTTP/1.1\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.target, "/../../etc/passwd");
}

#[test]
fn test_parse_missing_version_is_bad_request() {
    let result = parse_request(b"GET /\r\n\r\n");

    assert!(matches!(result, Err(HttpError::BadRequest)));
}

#[test]
fn test_parse_extra_token_is_bad_request() {
    let result = parse_request(b"GET / HTTP/1.1 extra\r\n\r\n");

    assert!(matches!(result, Err(HttpError::BadRequest)));
}

#[test]
fn test_parse_empty_buffer_is_bad_request() {
    let result = parse_request(b"");

    assert_eq!(result.unwrap_err().status(), StatusCode::BadRequest);
}

#[test]
fn test_parse_unsupported_methods() {
    for method in ["POST", "PUT", "DELETE", "OPTIONS", "PATCH", "get", "Head"] {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method);
        let result = parse_request(req.as_bytes());

        match result {
            Err(HttpError::MethodNotAllowed(m)) => assert_eq!(m, method),
            other => panic!("expected 405 for {method}, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_token_count_checked_before_method() {
    let result = parse_request(b"POST /\r\n\r\n");

    assert!(matches!(result, Err(HttpError::BadRequest)));
}

#[test]
fn test_parse_version_is_not_validated() {
    let parsed = parse_request(b"GET /index.html HTTP/9.9\r\n\r\n").unwrap();

    assert_eq!(parsed.target, "/index.html");
}

#[test]
fn test_parse_partial_request_without_terminator() {
    let parsed = parse_request(b"GET /a.txt HTTP/1.0").unwrap();

    assert_eq!(parsed.target, "/a.txt");
}
