//! Network primitives: listener binding and connection identity.

pub mod connection;
pub mod listener;

pub use connection::ConnectionId;
pub use listener::{Listener, ListenerError};
