//! Config store port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted configuration.
///
/// Backed by a single file; a missing file loads as the empty config so the
/// tool runs unconfigured.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored config, or the empty config when none exists
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the given config, creating the parent directory if needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Write a fresh default config; fails if one already exists
    async fn init(&self) -> Result<(), ConfigError>;

    /// Location of the backing file
    fn path(&self) -> PathBuf;

    /// True if the backing file exists
    fn exists(&self) -> bool;
}
