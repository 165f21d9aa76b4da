use std::fmt;

/// HTTP request methods the server answers.
///
/// Anything else is rejected by the parser before a [`Request`] exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a file
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use static_httpd::http::request::Method;
    /// assert_eq!(Method::from_str("HEAD"), Some(Method::HEAD));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request line.
///
/// Headers are never looked at, so only the method and the percent-decoded
/// target are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Decoded request target, e.g. "/docs/index.html?v=2"
    pub target: String,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
        }
    }

    /// The part of the target that gets joined onto the document root.
    ///
    /// Drops everything up to and including the first `/`, then anything from
    /// the first `?` onwards.
    ///
    /// # Example
    ///
    /// ```
    /// # use static_httpd::http::request::{Method, Request};
    /// let req = Request::new(Method::GET, "/css/site.css?v=3");
    /// assert_eq!(req.clean_target(), "css/site.css");
    /// ```
    pub fn clean_target(&self) -> &str {
        let after_slash = self
            .target
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or("");

        after_slash
            .split_once('?')
            .map(|(path, _)| path)
            .unwrap_or(after_slash)
    }

    /// Whether the response should carry the file body.
    pub fn wants_body(&self) -> bool {
        self.method != Method::HEAD
    }
}
