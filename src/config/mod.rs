//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → consumed by RelayServer at bind time
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart (the source
//!   session is one-shot, so hot reload has nothing meaningful to rebind)
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BufferConfig, ListenerConfig, ObservabilityConfig, RelayConfig};
