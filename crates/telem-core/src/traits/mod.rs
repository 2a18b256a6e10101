//! Core traits for the telemetry cache.

mod retriever;

pub use retriever::ChannelRetriever;
