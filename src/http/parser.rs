use percent_encoding::percent_decode_str;

use crate::error::HttpError;
use crate::http::request::{Method, Request};

/// Parses the request line out of the raw bytes read from a connection.
///
/// Only the first line is inspected; headers are ignored. The line must split
/// into exactly three whitespace-separated tokens (method, target, version).
/// The version token is accepted as-is.
pub fn parse_request(buf: &[u8]) -> Result<Request, HttpError> {
    let line_bytes = request_line(buf);
    let line = String::from_utf8_lossy(line_bytes);

    let mut parts = line.split_whitespace();
    let (Some(method_str), Some(raw_target), Some(_version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(HttpError::BadRequest);
    };

    let method = Method::from_str(method_str)
        .ok_or_else(|| HttpError::MethodNotAllowed(method_str.to_string()))?;

    let target = percent_decode_str(raw_target)
        .decode_utf8_lossy()
        .into_owned();

    Ok(Request { method, target })
}

/// Bytes up to the first CRLF, or the whole buffer if there is none.
fn request_line(buf: &[u8]) -> &[u8] {
    buf.windows(2)
        .position(|w| w == b"\r\n")
        .map(|end| &buf[..end])
        .unwrap_or(buf)
}
