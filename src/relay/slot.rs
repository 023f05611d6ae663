//! Single-value holder for the live source connection.
//!
//! The source read loop owns the connection's read half; its write half is
//! published here so forward connections can reach it. At most one handle is
//! ever set per process lifetime: the slot goes empty → set → cleared, and
//! stays empty once the one source session ends.

use std::sync::{Arc, Mutex};

use tokio::net::tcp::OwnedWriteHalf;

/// Shared handle to the source connection's write half.
///
/// The inner async mutex is held per write, never across a whole forward
/// connection, so concurrent forwarders interleave at chunk granularity.
pub type SourceWriter = Arc<tokio::sync::Mutex<OwnedWriteHalf>>;

/// Mutually-exclusive cell holding the live source writer, if any.
pub struct SourceSlot {
    inner: Mutex<Option<SourceWriter>>,
}

impl SourceSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Publish the live source writer.
    pub fn set(&self, writer: SourceWriter) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(writer);
    }

    /// Retract the source writer. Handles already cloned out by `get` stay
    /// valid until their holders drop them.
    pub fn clear(&self) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Get a clone of the current writer, if a source is connected.
    ///
    /// The handle is not re-validated: if the source closes between this
    /// call and a write, that write fails with a connection error.
    pub fn get(&self) -> Option<SourceWriter> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for SourceSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::{TcpListener, TcpStream};

    async fn socket_writer() -> SourceWriter {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, _accepted) =
            tokio::join!(TcpStream::connect(addr), listener.accept());
        let (_read, write) = client.unwrap().into_split();
        Arc::new(tokio::sync::Mutex::new(write))
    }

    #[tokio::test]
    async fn empty_slot_returns_none() {
        let slot = SourceSlot::new();
        assert!(slot.get().is_none());
    }

    #[tokio::test]
    async fn set_get_clear_roundtrip() {
        let slot = SourceSlot::new();
        let writer = socket_writer().await;

        slot.set(Arc::clone(&writer));
        let held = slot.get().expect("writer should be set");
        assert!(Arc::ptr_eq(&held, &writer));

        slot.clear();
        assert!(slot.get().is_none());
        // The handle taken before clear is still usable by its holder.
        assert!(Arc::strong_count(&held) >= 2);
    }
}
