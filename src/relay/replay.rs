//! Replay acceptor: consumers that drain the buffer.
//!
//! Each accepted connection gets the entire current buffer contents (drained
//! atomically, first client wins) followed by a close. A client connecting
//! to an empty buffer just sees an immediate close.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::net::{ConnectionId, Listener};
use crate::relay::buffer::ReplayBuffer;

/// Accept replay clients forever, one task per connection.
///
/// Accept errors are transient: they are logged and the loop continues.
pub async fn run_replay(listener: Listener, buffer: Arc<ReplayBuffer>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                let buffer = Arc::clone(&buffer);
                tokio::spawn(async move {
                    handle_replay(stream, peer_addr, buffer).await;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept replay connection");
            }
        }
    }
}

/// Send the drained buffer snapshot to one replay client and close.
async fn handle_replay(mut stream: TcpStream, peer_addr: SocketAddr, buffer: Arc<ReplayBuffer>) {
    let id = ConnectionId::new();
    tracing::info!(connection_id = %id, peer_addr = %peer_addr, "Replay client connected");
    metrics::counter!("relay_connections_total", "role" => "replay").increment(1);

    let data = buffer.drain();
    if data.is_empty() {
        tracing::info!(connection_id = %id, peer_addr = %peer_addr, "Buffer is empty; nothing to replay");
        return;
    }

    match stream.write_all(&data).await {
        Ok(()) => {
            metrics::counter!("relay_replayed_bytes_total").increment(data.len() as u64);
            // Flush the stream before the drop-close so the client sees
            // every byte followed by a clean EOF.
            let _ = stream.shutdown().await;
            tracing::info!(
                connection_id = %id,
                peer_addr = %peer_addr,
                bytes = data.len(),
                "Replay sent; closing connection"
            );
        }
        Err(e) => {
            tracing::error!(
                connection_id = %id,
                peer_addr = %peer_addr,
                error = %e,
                "Error sending buffer to replay client"
            );
        }
    }
}
