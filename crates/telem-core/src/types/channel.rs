//! Channel metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::series::DataType;

/// Unique identifier of a telemetry channel.
pub type ChannelKey = u32;

/// Metadata describing a telemetry channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique key of the channel
    pub key: ChannelKey,
    /// Human-readable name
    pub name: String,
    /// Sample encoding
    pub data_type: DataType,
    /// Whether the channel indexes other channels
    #[serde(default)]
    pub is_index: bool,
}

impl Channel {
    /// Create channel metadata.
    pub fn new(key: ChannelKey, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            key,
            name: name.into(),
            data_type,
            is_index: false,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.key, self.data_type)
    }
}
