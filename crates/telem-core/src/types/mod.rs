//! Core data types for the telemetry cache.

mod channel;
mod series;
mod telem;

pub use channel::{Channel, ChannelKey};
pub use series::{DataType, Series};
pub use telem::{TimeRange, TimeSpan, TimeStamp};
