use std::fmt;

/// HTTP status codes used by the server.
///
/// The numeric code and reason phrase live in [`STATUS_TABLE`] rather than in
/// the variants themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 408 Request Timeout
    RequestTimeout,
    /// 413 Entity Too Large
    EntityTooLarge,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

/// Numeric code and reason phrase for a [`StatusCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u16,
    pub reason: &'static str,
}

/// Process-wide status table, indexed by `StatusCode as usize`.
pub static STATUS_TABLE: [StatusLine; 11] = [
    StatusLine { code: 200, reason: "OK" },
    StatusLine { code: 400, reason: "Bad Request" },
    StatusLine { code: 403, reason: "Forbidden" },
    StatusLine { code: 404, reason: "Not Found" },
    StatusLine { code: 405, reason: "Method Not Allowed" },
    StatusLine { code: 408, reason: "Request Timeout" },
    StatusLine { code: 413, reason: "Entity Too Large" },
    StatusLine { code: 415, reason: "Unsupported Media Type" },
    StatusLine { code: 500, reason: "Internal Server Error" },
    StatusLine { code: 501, reason: "Not Implemented" },
    StatusLine { code: 505, reason: "HTTP Version Not Supported" },
];

impl StatusCode {
    pub fn line(&self) -> StatusLine {
        STATUS_TABLE[*self as usize]
    }

    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use static_httpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::UnsupportedMediaType.as_u16(), 415);
    /// ```
    pub fn as_u16(&self) -> u16 {
        self.line().code
    }

    /// Returns the reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use static_httpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        self.line().reason
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A response ready to be serialized.
///
/// `content_length` normally equals `body.len()`. For HEAD the body is empty
/// while `content_length` still reports the size of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub content_length: u64,
}

impl Response {
    /// Creates a 200 OK response carrying a file body.
    pub fn ok(body: Vec<u8>, content_type: &'static str) -> Self {
        let content_length = body.len() as u64;
        Self {
            status: StatusCode::Ok,
            body,
            content_type,
            content_length,
        }
    }

    /// Creates a 200 OK response with no body, advertising `content_length`.
    pub fn head(content_length: u64, content_type: &'static str) -> Self {
        Self {
            status: StatusCode::Ok,
            body: Vec::new(),
            content_type,
            content_length,
        }
    }

    /// Creates a plain-text error response whose body is the status line text,
    /// e.g. `404 Not Found`.
    pub fn error(status: StatusCode) -> Self {
        let body = status.to_string().into_bytes();
        let content_length = body.len() as u64;
        Self {
            status,
            body,
            content_type: "text/plain",
            content_length,
        }
    }
}
