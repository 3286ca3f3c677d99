//! Error types for route construction and configuration loading.
//!
//! The navigation core itself never fails: missing elements, unregistered
//! routes and unmatched scroll offsets all degrade to no-ops. Only turning
//! untrusted text into a [`Route`](crate::Route) and reading configuration
//! can go wrong.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a string is not a valid route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The empty string never names a section.
    #[error("route must not be empty")]
    Empty,

    /// Routes are fragment payloads and cannot carry the fragment marker.
    #[error("route {0:?} must not contain '#'")]
    ContainsHash(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error parsing TOML syntax or shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error reading a configuration file.
    #[error("I/O error reading {path}: {error}")]
    Io {
        /// Path to the file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        error: std::io::Error,
    },

    /// A pixel or timing value is negative or not finite.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
