//! Error types for Burst

use crate::id::NodeId;
use thiserror::Error;

/// The main error type for Burst operations
#[derive(Debug, Error)]
pub enum BurstError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Attaching {child} under {parent} would create a cycle")]
    HierarchyCycle { parent: NodeId, child: NodeId },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Burst operations
pub type Result<T> = std::result::Result<T, BurstError>;

impl From<toml::de::Error> for BurstError {
    fn from(err: toml::de::Error) -> Self {
        BurstError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for BurstError {
    fn from(err: toml::ser::Error) -> Self {
        BurstError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_error_names_both_nodes() {
        let err = BurstError::HierarchyCycle {
            parent: NodeId::from_raw(3),
            child: NodeId::from_raw(7),
        };
        assert_eq!(err.to_string(), "Attaching 7 under 3 would create a cycle");
    }

    #[test]
    fn toml_errors_convert() {
        let bad: std::result::Result<toml::Value, _> = toml::from_str("= nope");
        let err: BurstError = bad.unwrap_err().into();
        assert!(matches!(err, BurstError::TomlParseError(_)));
    }
}
