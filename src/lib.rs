//! static-httpd - Concurrent static file server
//!
//! Serves GET/HEAD requests for files beneath a fixed document root using a
//! fixed pool of accept workers.

pub mod config;
pub mod docroot;
pub mod error;
pub mod http;
pub mod server;
