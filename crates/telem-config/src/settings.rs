//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use telem_cache::CacheSettings;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "telemetry-cache".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Cache tuning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Samples held by each live rolling buffer.
    pub dynamic_buffer_capacity: usize,
    /// Seconds between background GC sweeps.
    pub gc_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dynamic_buffer_capacity: 10_000,
            gc_interval_secs: 30,
        }
    }
}

impl From<CacheConfig> for CacheSettings {
    fn from(config: CacheConfig) -> Self {
        CacheSettings {
            dynamic_buffer_capacity: config.dynamic_buffer_capacity,
            gc_interval: Duration::from_secs(config.gc_interval_secs),
        }
    }
}
