//! Listening socket and the accept worker pool.

pub mod listener;
pub mod worker;

pub use listener::{BindError, Server};
