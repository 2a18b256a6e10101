//! Channel-metadata retriever trait definition.

use crate::error::RetrievalError;
use crate::types::{Channel, ChannelKey};
use async_trait::async_trait;

/// Trait for external channel-metadata sources.
///
/// Implementations are expected to resolve a batch of channel keys in a
/// single round trip. The cache never calls `retrieve` for a key it already
/// holds.
#[async_trait]
pub trait ChannelRetriever: Send + Sync {
    /// Fetch metadata for the given channel keys.
    ///
    /// # Returns
    /// One descriptor per resolvable key. Keys the historian does not know
    /// may be omitted from the result or reported as an error, at the
    /// implementation's discretion.
    async fn retrieve(&self, keys: &[ChannelKey]) -> Result<Vec<Channel>, RetrievalError>;

    /// Get the retriever name.
    fn name(&self) -> &str;
}
