//! TCP listener wrapper.
//!
//! # Responsibilities
//! - Bind to a configured address
//! - Accept incoming TCP connections
//! - Separate fatal bind failures from transient accept failures
//!
//! The relay intentionally places no connection limit here: every replay and
//! forward connection gets its own task, and admission control is out of
//! contract.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to the configured address. Fatal at startup.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to accept a connection. Transient; callers log and continue.
    #[error("failed to accept on {addr}: {source}")]
    Accept {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// A bound TCP listener with a logged identity.
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
    /// Human-readable role for log lines ("source", "replay", "forward").
    role: &'static str,
}

impl Listener {
    /// Bind to the configured address.
    pub async fn bind(role: &'static str, config: &ListenerConfig) -> Result<Self, ListenerError> {
        let inner = TcpListener::bind(&config.bind_address)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: config.bind_address.clone(),
                source,
            })?;

        let local_addr = inner.local_addr().map_err(|source| ListenerError::Bind {
            addr: config.bind_address.clone(),
            source,
        })?;

        tracing::info!(
            role = role,
            address = %local_addr,
            "Listener bound"
        );

        Ok(Self {
            inner,
            local_addr,
            role,
        })
    }

    /// Accept one connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ListenerError> {
        let (stream, addr) = self
            .inner
            .accept()
            .await
            .map_err(|source| ListenerError::Accept {
                addr: self.local_addr,
                source,
            })?;

        tracing::debug!(
            role = self.role,
            peer_addr = %addr,
            "Connection accepted"
        );

        Ok((stream, addr))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The role this listener was bound for.
    pub fn role(&self) -> &'static str {
        self.role
    }
}
