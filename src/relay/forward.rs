//! Forward acceptor: producers relayed to the live source connection.
//!
//! Each accepted connection is streamed verbatim to the source connection's
//! write half until the inbound side reaches EOF or either side errors. With
//! no source connected the inbound connection is closed immediately, zero
//! bytes read.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::net::{ConnectionId, Listener};
use crate::relay::slot::SourceSlot;

const READ_CHUNK_BYTES: usize = 8 * 1024;

/// Accept forward clients forever, one task per connection.
pub async fn run_forward(listener: Listener, slot: Arc<SourceSlot>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                let slot = Arc::clone(&slot);
                tokio::spawn(async move {
                    handle_forward(stream, peer_addr, slot).await;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept forward connection");
            }
        }
    }
}

/// Relay one forward client's bytes to the source connection.
async fn handle_forward(mut stream: TcpStream, peer_addr: SocketAddr, slot: Arc<SourceSlot>) {
    let id = ConnectionId::new();
    tracing::info!(connection_id = %id, peer_addr = %peer_addr, "Forward client connected");
    metrics::counter!("relay_connections_total", "role" => "forward").increment(1);

    let Some(writer) = slot.get() else {
        tracing::info!(
            connection_id = %id,
            peer_addr = %peer_addr,
            "No source client connected; closing forward connection"
        );
        return;
    };

    let mut chunk = vec![0u8; READ_CHUNK_BYTES];
    let mut total: u64 = 0;

    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                // The writer lock is held per chunk, never across the whole
                // connection, so concurrent forwarders interleave instead of
                // serializing.
                let mut write_half = writer.lock().await;
                if let Err(e) = write_half.write_all(&chunk[..n]).await {
                    tracing::error!(
                        connection_id = %id,
                        peer_addr = %peer_addr,
                        error = %e,
                        "Error writing to source client"
                    );
                    break;
                }
                drop(write_half);
                total += n as u64;
                metrics::counter!("relay_forwarded_bytes_total").increment(n as u64);
            }
            Err(e) => {
                tracing::error!(
                    connection_id = %id,
                    peer_addr = %peer_addr,
                    error = %e,
                    "Error reading from forward client"
                );
                break;
            }
        }
    }

    tracing::info!(
        connection_id = %id,
        peer_addr = %peer_addr,
        bytes = total,
        "Forward client disconnected"
    );
}
