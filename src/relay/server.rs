//! Relay server wiring.
//!
//! # Responsibilities
//! - Bind the three listeners eagerly (a bind failure is fatal at startup)
//! - Own the shared `ReplayBuffer` and `SourceSlot`, injected into each
//!   acceptor task rather than living as globals
//! - Spawn the acceptor loops and wait for the shutdown signal

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::RelayConfig;
use crate::net::{Listener, ListenerError};
use crate::relay::buffer::ReplayBuffer;
use crate::relay::slot::SourceSlot;
use crate::relay::{forward, replay, source};

/// A fully bound relay, ready to run.
pub struct RelayServer {
    source: Listener,
    replay: Listener,
    forward: Listener,
    buffer: Arc<ReplayBuffer>,
    slot: Arc<SourceSlot>,
}

impl RelayServer {
    /// Bind all three listeners. The service is unusable without any one of
    /// its ports, so the first bind failure aborts startup.
    pub async fn bind(config: &RelayConfig) -> Result<Self, ListenerError> {
        let source = Listener::bind("source", &config.source).await?;
        let replay = Listener::bind("replay", &config.replay).await?;
        let forward = Listener::bind("forward", &config.forward).await?;

        Ok(Self {
            source,
            replay,
            forward,
            buffer: Arc::new(ReplayBuffer::new(config.buffer.max_bytes)),
            slot: Arc::new(SourceSlot::new()),
        })
    }

    /// Address the source listener is bound to.
    pub fn source_addr(&self) -> SocketAddr {
        self.source.local_addr()
    }

    /// Address the replay listener is bound to.
    pub fn replay_addr(&self) -> SocketAddr {
        self.replay.local_addr()
    }

    /// Address the forward listener is bound to.
    pub fn forward_addr(&self) -> SocketAddr {
        self.forward.local_addr()
    }

    /// Run the acceptor loops until the shutdown signal fires.
    ///
    /// The replay and forward loops run indefinitely; the source task
    /// terminates on its own once the one source session ends.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            source_addr = %self.source_addr(),
            replay_addr = %self.replay_addr(),
            forward_addr = %self.forward_addr(),
            "Relay started"
        );

        let source_task = tokio::spawn(source::run_source(
            self.source,
            Arc::clone(&self.buffer),
            Arc::clone(&self.slot),
        ));
        let replay_task = tokio::spawn(replay::run_replay(self.replay, Arc::clone(&self.buffer)));
        let forward_task = tokio::spawn(forward::run_forward(self.forward, Arc::clone(&self.slot)));

        let _ = shutdown.recv().await;

        source_task.abort();
        replay_task.abort();
        forward_task.abort();

        tracing::info!("Relay stopped");
    }
}
