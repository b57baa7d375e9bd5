//! Error types for tramline-core

use thiserror::Error;

/// Result type alias for tramline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by request construction and config loading.
///
/// The parameter operations themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid HTTP method
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Invalid request URI
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Config could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
