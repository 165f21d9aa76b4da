//! HTTP protocol implementation.
//!
//! This module implements the small subset of HTTP/1.1 the file server needs:
//! one GET or HEAD request per connection, answered with `Connection: close`.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine (receive, parse, resolve, respond)
//! - **`parser`**: Turns the raw request bytes into a [`request::Request`]
//! - **`request`**: Request representation and the supported methods
//! - **`response`**: Status table and response representation
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: Content types keyed by file extension
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │  Receiving  │ ← Read until "\r\n\r\n", 8 KiB or EOF
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │   Parsing   │ ← Request line only
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │  Resolving  │ ← Map target onto the document root
//!        └──────┬──────┘
//!               ▼                 any failure jumps straight here
//!        ┌─────────────┐  ◄───────────────────────────────────
//!        │ Responding  │
//!        └──────┬──────┘
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
