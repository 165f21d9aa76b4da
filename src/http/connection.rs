use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::config::{REQUEST_CHUNK_SIZE, REQUEST_MAX_SIZE, ServerConfig};
use crate::error::HttpError;
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Handles exactly one request on an accepted connection.
///
/// The stream is owned by the connection and dropped, which closes the
/// socket, when [`Connection::run`] returns.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    config: Arc<ServerConfig>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Receiving,
    Parsing(BytesMut),
    Resolving(Request),
    Responding(Response),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, config: Arc<ServerConfig>) -> Self {
        Self {
            stream,
            peer,
            config,
            state: ConnectionState::Receiving,
        }
    }

    pub async fn run(mut self) {
        debug!(peer = %self.peer, "connected");

        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Receiving => match self.receive().await {
                    Ok(buf) => ConnectionState::Parsing(buf),
                    Err(e) => self.fail(e),
                },

                ConnectionState::Parsing(buf) => match parse_request(&buf) {
                    Ok(req) => ConnectionState::Resolving(req),
                    Err(e) => self.fail(e),
                },

                ConnectionState::Resolving(req) => {
                    match self.config.document_root.serve(&req).await {
                        Ok(response) => {
                            info!(
                                peer = %self.peer,
                                method = %req.method,
                                target = %req.target,
                                "request served"
                            );
                            ConnectionState::Responding(response)
                        }
                        Err(e) => self.fail(e),
                    }
                }

                ConnectionState::Responding(response) => {
                    self.respond(&response).await;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        debug!(peer = %self.peer, "connection closed");
    }

    /// Reads until the end of the headers, the size limit, or EOF.
    ///
    /// Whatever has accumulated is returned even if no terminator was seen.
    pub async fn receive(&mut self) -> Result<BytesMut, HttpError> {
        let mut buffer = BytesMut::with_capacity(REQUEST_CHUNK_SIZE);
        let mut chunk = [0u8; REQUEST_CHUNK_SIZE];
        // Start of the region not yet searched for the terminator
        let mut scan_from = 0;

        loop {
            if buffer.len() > REQUEST_MAX_SIZE || contains_headers_end(&buffer[scan_from..]) {
                break;
            }

            let n = timeout(self.config.read_timeout, self.stream.read(&mut chunk))
                .await
                .map_err(|_| HttpError::RequestTimeout)??;

            if n == 0 {
                break;
            }

            scan_from = buffer.len().saturating_sub(HEADERS_END.len() - 1);
            buffer.extend_from_slice(&chunk[..n]);
        }

        Ok(buffer)
    }

    /// Sends the response. Failures are logged and dropped since the
    /// connection is closing either way.
    async fn respond(&mut self, response: &Response) {
        let mut writer = ResponseWriter::new(response);

        if let Err(e) = writer
            .write_to_stream(&mut self.stream, self.config.write_timeout)
            .await
        {
            warn!(peer = %self.peer, error = %e, "can't send a response");
        }
    }

    fn fail(&self, err: HttpError) -> ConnectionState {
        let status = err.status();

        if err.is_classified() {
            info!(peer = %self.peer, %status, error = %err, "request failed");
        } else {
            error!(peer = %self.peer, %status, error = ?err, "unexpected error");
        }

        ConnectionState::Responding(Response::error(status))
    }
}

fn contains_headers_end(buf: &[u8]) -> bool {
    buf.windows(HEADERS_END.len()).any(|w| w == HEADERS_END)
}
