use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{Instrument, debug, debug_span, info_span, warn};

use crate::config::ServerConfig;
use crate::http::connection::Connection;

/// Accept loop of a single worker.
///
/// Each accepted connection is handled to completion before the next
/// `accept`, so the OS backlog is the only queue. Accept errors are logged
/// and the loop carries on.
pub async fn run(id: usize, listener: Arc<TcpListener>, config: Arc<ServerConfig>) {
    async move {
        debug!("worker started");

        loop {
            let (socket, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };

            Connection::new(socket, peer, Arc::clone(&config))
                .run()
                .instrument(debug_span!("conn", %peer))
                .await;
        }
    }
    .instrument(info_span!("worker", id))
    .await
}
