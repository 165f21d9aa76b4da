//! Per-request error taxonomy.
//!
//! Every failure while handling a connection ends up as one of these and is
//! turned into a single terminal HTTP status. Nothing here is ever retried.

use thiserror::Error;

use crate::http::response::StatusCode;

#[derive(Debug, Error)]
pub enum HttpError {
    /// No request terminator arrived before the read deadline
    #[error("timed out waiting for request")]
    RequestTimeout,

    /// Request line did not split into exactly three tokens
    #[error("malformed request line")]
    BadRequest,

    #[error("method `{0}` is not allowed")]
    MethodNotAllowed(String),

    /// Resolved path is not inside the document root
    #[error("path escapes the document root")]
    Forbidden,

    #[error("no such file")]
    NotFound,

    #[error("unsupported media type `{0}`")]
    UnsupportedMediaType(String),

    /// Anything unexpected; reported to the client as a bare 500
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::RequestTimeout => StatusCode::RequestTimeout,
            HttpError::BadRequest => StatusCode::BadRequest,
            HttpError::MethodNotAllowed(_) => StatusCode::MethodNotAllowed,
            HttpError::Forbidden => StatusCode::Forbidden,
            HttpError::NotFound => StatusCode::NotFound,
            HttpError::UnsupportedMediaType(_) => StatusCode::UnsupportedMediaType,
            HttpError::Io(_) => StatusCode::InternalServerError,
        }
    }

    /// Whether the failure was anticipated by the protocol handling, as
    /// opposed to an internal fault that deserves full diagnostics.
    pub fn is_classified(&self) -> bool {
        !matches!(self, HttpError::Io(_))
    }
}
