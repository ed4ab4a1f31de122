//! Error types for kindling-config

use thiserror::Error;

/// Result type alias using kindling-config's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration and validation error types
#[derive(Error, Debug)]
pub enum Error {
    /// A config document was combined with topology flags
    #[error("flag --config can't be used in combination with --{flags} flags")]
    ConflictingFlags { flags: String },

    /// A node count flag was negative
    #[error("flags --{flags} should not be a negative number")]
    NegativeNodeCount { flags: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration content
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The document declares a schema version we do not understand
    #[error("Unsupported apiVersion: {version}. Expected: {expected}")]
    UnsupportedApiVersion { version: String, expected: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a conflicting flags error from the offending flag names
    pub fn conflicting_flags(flags: &[&str]) -> Self {
        Self::ConflictingFlags {
            flags: flags.join(",--"),
        }
    }

    /// Create a negative node count error from the offending flag names
    pub fn negative_node_count(flags: &[&str]) -> Self {
        Self::NegativeNodeCount {
            flags: flags.join(" and --"),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unsupported apiVersion error
    pub fn unsupported_api_version(version: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::UnsupportedApiVersion {
            version: version.into(),
            expected: expected.into(),
        }
    }
}
