//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default buffer cap: 10 MiB.
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 10 * 1024 * 1024;

/// Root configuration for the TCP relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Source listener (the single producer connection).
    pub source: ListenerConfig,

    /// Replay listener (consumers that drain the buffer).
    pub replay: ListenerConfig,

    /// Forward listener (producers relayed to the live source connection).
    pub forward: ListenerConfig,

    /// Buffer settings.
    pub buffer: BufferConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Defaults matching the original deployment's fixed ports.
    pub fn local_default() -> Self {
        Self {
            source: ListenerConfig {
                bind_address: "127.0.0.1:13337".to_string(),
            },
            replay: ListenerConfig {
                bind_address: "127.0.0.1:13338".to_string(),
            },
            forward: ListenerConfig {
                bind_address: "127.0.0.1:13339".to_string(),
            },
            ..Default::default()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:13337"). Port 0 binds an ephemeral
    /// port, useful in tests.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_string(),
        }
    }
}

/// Buffer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Maximum bytes retained from the source stream. Bytes past the cap
    /// are discarded, never buffered.
    pub max_bytes: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BUFFER_BYTES,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
