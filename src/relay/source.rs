//! Source acceptor: the single producer session.
//!
//! # Responsibilities
//! - Accept exactly one connection on the source listener
//! - Publish its write half in the `SourceSlot` for forwarders
//! - Stream its bytes into the `ReplayBuffer`, stopping at the cap
//! - Retract the slot and terminate when the session ends
//!
//! The accept path runs once by design: later connectors sit in the OS
//! backlog and are never serviced. This is a deliberate single-client
//! restriction, not an oversight.

use std::sync::Arc;

use tokio::io::AsyncReadExt;

use crate::net::Listener;
use crate::relay::buffer::ReplayBuffer;
use crate::relay::slot::SourceSlot;

const READ_CHUNK_BYTES: usize = 8 * 1024;

/// Accept the one source connection and drive its read loop to completion.
///
/// Returns once the source session ends (EOF, read error, or cap reached);
/// the listener is not reopened.
pub async fn run_source(listener: Listener, buffer: Arc<ReplayBuffer>, slot: Arc<SourceSlot>) {
    let (stream, peer_addr) = match listener.accept().await {
        Ok(accepted) => accepted,
        Err(e) => {
            tracing::error!(error = %e, "Failed to accept source connection");
            return;
        }
    };

    tracing::info!(
        peer_addr = %peer_addr,
        listen_addr = %listener.local_addr(),
        "Source client connected; no further source connections will be accepted"
    );
    metrics::counter!("relay_connections_total", "role" => "source").increment(1);

    let (mut read_half, write_half) = stream.into_split();
    slot.set(Arc::new(tokio::sync::Mutex::new(write_half)));

    // Bounded read: never read past the cap, independent of the buffer's
    // own truncation guard.
    let cap = buffer.max_bytes();
    let mut chunk = vec![0u8; READ_CHUNK_BYTES];
    let mut total: usize = 0;

    loop {
        let remaining = cap - total;
        if remaining == 0 {
            tracing::warn!(cap_bytes = cap, "Source stream reached buffer cap; closing session");
            break;
        }
        let want = remaining.min(chunk.len());

        match read_half.read(&mut chunk[..want]).await {
            Ok(0) => {
                break;
            }
            Ok(n) => {
                total += n;
                buffer.append(&chunk[..n]);
                metrics::counter!("relay_source_bytes_total").increment(n as u64);
            }
            Err(e) => {
                tracing::error!(peer_addr = %peer_addr, error = %e, "Error reading from source client");
                break;
            }
        }
    }

    slot.clear();
    tracing::info!(
        peer_addr = %peer_addr,
        bytes = total,
        "Source client disconnected"
    );
}
