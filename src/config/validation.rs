//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check bind addresses parse and do not collide with each other
//! - Validate value ranges (buffer cap > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A bind address failed to parse as `host:port`.
    InvalidAddress { field: &'static str, value: String },
    /// Two listeners share the same concrete address.
    AddressCollision { first: &'static str, second: &'static str, value: String },
    /// Buffer cap must be non-zero.
    ZeroBufferCap,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{} bind_address '{}' is not a valid socket address", field, value)
            }
            ValidationError::AddressCollision { first, second, value } => {
                write!(f, "{} and {} listeners share address '{}'", first, second, value)
            }
            ValidationError::ZeroBufferCap => {
                write!(f, "buffer.max_bytes must be greater than zero")
            }
        }
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listeners = [
        ("source", &config.source.bind_address),
        ("replay", &config.replay.bind_address),
        ("forward", &config.forward.bind_address),
    ];

    let mut parsed: Vec<(&'static str, SocketAddr)> = Vec::new();
    for (field, value) in listeners {
        match value.parse::<SocketAddr>() {
            Ok(addr) => parsed.push((field, addr)),
            Err(_) => errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            }),
        }
    }

    // Port 0 means "any free port"; two ephemeral listeners never collide.
    for i in 0..parsed.len() {
        for j in (i + 1)..parsed.len() {
            let (first, a) = parsed[i];
            let (second, b) = parsed[j];
            if a == b && a.port() != 0 {
                errors.push(ValidationError::AddressCollision {
                    first,
                    second,
                    value: a.to_string(),
                });
            }
        }
    }

    if config.buffer.max_bytes == 0 {
        errors.push(ValidationError::ZeroBufferCap);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RelayConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
        assert!(validate_config(&RelayConfig::local_default()).is_ok());
    }

    #[test]
    fn rejects_bad_address_and_zero_cap_together() {
        let mut config = RelayConfig::default();
        config.source.bind_address = "not-an-address".into();
        config.buffer.max_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::InvalidAddress { field: "source", .. }));
        assert!(matches!(errors[1], ValidationError::ZeroBufferCap));
    }

    #[test]
    fn rejects_colliding_listeners() {
        let mut config = RelayConfig::local_default();
        config.replay.bind_address = config.source.bind_address.clone();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::AddressCollision { .. }));
    }

    #[test]
    fn ephemeral_ports_do_not_collide() {
        // All three listeners on port 0 is the standard test setup.
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }
}
