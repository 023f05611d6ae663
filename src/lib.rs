//! In-memory TCP buffer relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                  TCP RELAY                     │
//!                    │                                                │
//!  source client ────┼─▶ source listener ──▶ read loop (capped) ──┐  │
//!  (one, ever)       │         │                                  ▼  │
//!                    │         └─▶ SourceSlot ◀──┐          ReplayBuffer
//!                    │                           │                │  │
//!  forward clients ──┼─▶ forward listener ───────┘                │  │
//!  (unlimited)       │     (bytes relayed to source connection)   │  │
//!                    │                                            │  │
//!  replay clients ◀──┼── replay listener ◀── drain-and-clear ─────┘  │
//!  (unlimited)       │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │   config   lifecycle   observability     │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! One source client streams bytes in; they accumulate in a capped in-memory
//! buffer. Replay clients atomically drain the buffer. Forward clients push
//! bytes straight to the live source connection. Connection boundaries are
//! the only framing.

// Core subsystems
pub mod config;
pub mod net;
pub mod relay;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use lifecycle::Shutdown;
pub use relay::RelayServer;
