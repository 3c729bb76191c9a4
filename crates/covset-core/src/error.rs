//! Error types for covset

use crate::signal::CollisionSignal;
use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum Error {
    /// Duplicate hashes were resolved. The mutation that produced this
    /// still succeeded.
    #[error("Non-fatal error: {0}")]
    Collision(CollisionSignal),

    #[error("Malformed record batch: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification callers check instead of matching variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NonFatal,
    Malformed,
    Serialization,
    Config,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Collision(_) => ErrorKind::NonFatal,
            Error::Malformed(_) => ErrorKind::Malformed,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// True for errors that only report resolved duplicates
    pub fn is_non_fatal(&self) -> bool {
        self.kind() == ErrorKind::NonFatal
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Malformed(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Error::Malformed(e.to_string())
    }
}

/// Result type alias for covset operations
pub type Result<T> = std::result::Result<T, Error>;
