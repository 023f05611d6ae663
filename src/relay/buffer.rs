//! Shared replay buffer.
//!
//! # Responsibilities
//! - Accumulate bytes from the source connection, in order
//! - Enforce the configured cap by discarding excess bytes
//! - Hand the entire contents to exactly one drainer, atomically
//!
//! # Design Decisions
//! - `std::sync::Mutex` over a `Vec<u8>`: append and drain never await, so
//!   the critical section is short and a blocking lock is the right tool
//! - Drain takes the allocation with `mem::take` instead of copying

use std::sync::Mutex;

/// Byte accumulator shared between the source read loop and replay clients.
///
/// The lock is held only for the duration of a single `append` or `drain`,
/// never across connection I/O.
pub struct ReplayBuffer {
    inner: Mutex<Vec<u8>>,
    max_bytes: usize,
}

impl ReplayBuffer {
    /// Create an empty buffer with the given cap.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
            max_bytes,
        }
    }

    /// Append bytes, truncating at the cap. Returns the number of bytes
    /// actually retained; the rest are discarded, not buffered.
    pub fn append(&self, bytes: &[u8]) -> usize {
        let mut buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let room = self.max_bytes.saturating_sub(buf.len());
        let take = bytes.len().min(room);
        buf.extend_from_slice(&bytes[..take]);
        metrics::gauge!("relay_buffered_bytes").set(buf.len() as f64);
        take
    }

    /// Atomically capture the full contents and reset to empty.
    ///
    /// Nothing appended after this call begins is included in its result,
    /// and every byte present before the call is returned to exactly one
    /// drainer.
    pub fn drain(&self) -> Vec<u8> {
        let mut buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let data = std::mem::take(&mut *buf);
        metrics::gauge!("relay_buffered_bytes").set(0.0);
        data
    }

    /// Current number of buffered bytes.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the buffer is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured cap.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn appends_preserve_order_and_drain_empties() {
        let buf = ReplayBuffer::new(1024);
        assert_eq!(buf.append(b"hello "), 6);
        assert_eq!(buf.append(b"world"), 5);

        assert_eq!(buf.drain(), b"hello world");
        assert_eq!(buf.drain(), Vec::<u8>::new());
        assert!(buf.is_empty());
    }

    #[test]
    fn append_truncates_at_cap() {
        let buf = ReplayBuffer::new(8);
        assert_eq!(buf.append(b"12345"), 5);
        assert_eq!(buf.append(b"6789"), 3);
        assert_eq!(buf.append(b"more"), 0);

        assert_eq!(buf.drain(), b"12345678");
        // Draining frees the cap again.
        assert_eq!(buf.append(b"abc"), 3);
        assert_eq!(buf.drain(), b"abc");
    }

    #[test]
    fn oversized_single_append_is_clipped() {
        let buf = ReplayBuffer::new(4);
        assert_eq!(buf.append(b"abcdefgh"), 4);
        assert_eq!(buf.drain(), b"abcd");
    }

    #[test]
    fn concurrent_drains_never_duplicate_or_lose_bytes() {
        let buf = Arc::new(ReplayBuffer::new(usize::MAX));
        let total_appended = 64 * 1000;

        let mut writers = Vec::new();
        for _ in 0..8 {
            let buf = Arc::clone(&buf);
            writers.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    buf.append(&[1u8; 8]);
                }
            }));
        }

        let mut drainers = Vec::new();
        for _ in 0..4 {
            let buf = Arc::clone(&buf);
            drainers.push(std::thread::spawn(move || {
                let mut drained = 0usize;
                for _ in 0..200 {
                    drained += buf.drain().len();
                }
                drained
            }));
        }

        for w in writers {
            w.join().unwrap();
        }
        let drained: usize = drainers.into_iter().map(|d| d.join().unwrap()).sum();

        // Every appended byte is either in some drain result or still buffered.
        assert_eq!(drained + buf.len(), total_appended);
    }
}
