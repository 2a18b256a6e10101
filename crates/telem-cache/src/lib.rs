//! Client-side channel telemetry cache.
//!
//! Per channel, the cache combines a fixed-capacity rolling buffer for the
//! live streaming tail with an interval-indexed cache of previously fetched
//! historical ranges that tracks which sub-ranges of a query are still
//! missing. A top-level registry multiplexes per-channel caches, lazily
//! populates them from channel metadata, and periodically reclaims memory.

mod dynamic;
mod interval;
mod registry;
mod rolling;
mod unary;

pub use dynamic::DynamicCache;
pub use interval::{IntervalRead, StaticCache};
pub use registry::{Cache, CacheSettings};
pub use rolling::RollingBuffer;
pub use unary::{KeepAll, KeepWithin, RetentionPolicy, UnaryCache};
