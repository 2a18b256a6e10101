//! Core types and traits for the channel telemetry cache.
//!
//! This crate provides the foundational building blocks including:
//! - Time primitives (TimeStamp, TimeSpan, TimeRange)
//! - Sample containers (DataType, Series)
//! - Channel metadata (ChannelKey, Channel)
//! - The channel-metadata retriever boundary

pub mod types;
pub mod traits;
pub mod error;

pub use error::{CacheError, CacheResult, RetrievalError};
pub use types::*;
pub use traits::*;
