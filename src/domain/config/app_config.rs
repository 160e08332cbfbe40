//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Preferred input device name (substring match); None means the system
    /// default device
    pub device: Option<String>,
    /// Preferred capture sample rate in Hz; None means the device native rate
    pub sample_rate: Option<u32>,
}

impl AppConfig {
    /// Create config with default values (everything deferred to the device)
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            device: other.device.or(self.device),
            sample_rate: other.sample_rate.or(self.sample_rate),
        }
    }
}
