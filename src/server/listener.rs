use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket, lookup_host};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::{BACKLOG, ServerConfig};
use crate::server::worker;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("permission denied {0}")]
    PermissionDenied(String),

    #[error("invalid address/port: {addr}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: io::Error,
    },
}

/// A bound listening socket plus the configuration its workers share.
pub struct Server {
    listener: Arc<TcpListener>,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds `address:port` with `SO_REUSEADDR` and starts listening.
    ///
    /// No workers are started here, so a failed bind leaves nothing running.
    pub async fn bind(config: ServerConfig) -> Result<Self, BindError> {
        let listen_addr = config.listen_addr();
        let invalid = |source| BindError::InvalidAddress {
            addr: listen_addr.clone(),
            source,
        };

        let addr = lookup_host((config.address.as_str(), config.port))
            .await
            .map_err(invalid)?
            .next()
            .ok_or_else(|| {
                invalid(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "address resolved to nothing",
                ))
            })?;

        let listener = listen(addr).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => BindError::PermissionDenied(listen_addr.clone()),
            _ => invalid(e),
        })?;

        Ok(Self {
            listener: Arc::new(listener),
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Starts the configured number of accept workers.
    pub fn spawn_workers(&self) -> Vec<JoinHandle<()>> {
        if self.config.workers == 0 {
            warn!("no workers configured; connections will never be answered");
        }

        (1..=self.config.workers)
            .map(|id| {
                tokio::spawn(worker::run(
                    id,
                    Arc::clone(&self.listener),
                    Arc::clone(&self.config),
                ))
            })
            .collect()
    }

    /// Runs the workers until the process is interrupted.
    ///
    /// In-flight connections are not drained; they are dropped together with
    /// the runtime.
    pub async fn run(self) -> anyhow::Result<()> {
        let workers = self.spawn_workers();
        info!(
            addr = %self.local_addr()?,
            root = %self.config.document_root.path().display(),
            workers = workers.len(),
            "serving"
        );

        tokio::signal::ctrl_c().await?;
        info!("Shutdown signal received");

        for handle in &workers {
            handle.abort();
        }

        Ok(())
    }
}

fn listen(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(BACKLOG)
}
