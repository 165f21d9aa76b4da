use std::time::{Duration, SystemTime};

use anyhow::Context;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = "static-httpd";

/// Serializes `resp` as it goes on the wire, stamping `Date` with `now`.
pub fn serialize_response(resp: &Response, now: SystemTime) -> Vec<u8> {
    let head = format!(
        "{version} {status}\r\n\
         Date: {date}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {content_length}\r\n\
         Server: {server}\r\n\
         Connection: close\r\n\
         \r\n",
        version = HTTP_VERSION,
        status = resp.status,
        date = httpdate::fmt_http_date(now),
        content_type = resp.content_type,
        content_length = resp.content_length,
        server = SERVER_NAME,
    );

    let mut buf = Vec::with_capacity(head.len() + resp.body.len());
    buf.extend_from_slice(head.as_bytes());
    buf.extend_from_slice(&resp.body);
    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    /// Serializes the response with the current time in the `Date` header.
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response, SystemTime::now()),
            written: 0,
        }
    }

    /// Writes the whole response, giving each write call at most `deadline`.
    pub async fn write_to_stream<W>(
        &mut self,
        stream: &mut W,
        deadline: Duration,
    ) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = timeout(deadline, stream.write(&self.buffer[self.written..]))
                .await
                .context("timed out writing response")??;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        timeout(deadline, stream.flush())
            .await
            .context("timed out flushing response")??;

        Ok(())
    }
}
