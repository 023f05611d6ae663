//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use tcp_relay::{RelayConfig, RelayServer, Shutdown};

/// A relay running on ephemeral ports, with its shutdown handle.
pub struct TestRelay {
    pub source_addr: SocketAddr,
    pub replay_addr: SocketAddr,
    pub forward_addr: SocketAddr,
    pub shutdown: Shutdown,
}

/// Start a relay with the default (ephemeral-port) configuration.
pub async fn start_relay() -> TestRelay {
    start_relay_with(RelayConfig::default()).await
}

/// Start a relay with a custom configuration.
pub async fn start_relay_with(config: RelayConfig) -> TestRelay {
    let server = RelayServer::bind(&config).await.expect("bind relay");
    let relay = TestRelay {
        source_addr: server.source_addr(),
        replay_addr: server.replay_addr(),
        forward_addr: server.forward_addr(),
        shutdown: Shutdown::new(),
    };

    let rx = relay.shutdown.subscribe();
    tokio::spawn(async move {
        server.run(rx).await;
    });

    relay
}

/// Read a stream to EOF and return everything received.
pub async fn read_to_end(stream: &mut TcpStream) -> Vec<u8> {
    let mut data = Vec::new();
    stream.read_to_end(&mut data).await.expect("read to EOF");
    data
}
