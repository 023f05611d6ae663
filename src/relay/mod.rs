//! Relay core: the shared state and the three acceptor loops.
//!
//! # Data Flow
//! ```text
//! source client ──▶ source.rs read loop ──▶ ReplayBuffer (append, capped)
//!                                   │
//!                                   └─▶ SourceSlot (write half published)
//!
//! replay client ──▶ replay.rs ──▶ ReplayBuffer.drain() ──▶ client, close
//!
//! forward client ──▶ forward.rs ──▶ SourceSlot.get() ──▶ source connection
//! ```
//!
//! # Design Decisions
//! - Buffer and slot are the only cross-task shared state, each behind its
//!   own coarse lock held per operation
//! - One task per accepted replay/forward connection, no admission limit
//! - No timeouts or cancellation anywhere; a stalled client holds its task

pub mod buffer;
pub mod forward;
pub mod replay;
pub mod server;
pub mod slot;
pub mod source;

pub use buffer::ReplayBuffer;
pub use server::RelayServer;
pub use slot::{SourceSlot, SourceWriter};
