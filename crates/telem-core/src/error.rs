//! Error types for the telemetry cache.

use thiserror::Error;

use crate::types::ChannelKey;

/// Top-level cache error.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("channel not found: {0}")]
    NotFound(ChannelKey),

    #[error("channel retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors surfaced by the external channel-metadata retriever.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("channels not found: {0:?}")]
    ChannelsNotFound(Vec<ChannelKey>),

    #[error("retriever error: {0}")]
    Internal(String),
}

/// Result type alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
