//! Configuration management for detailcast
//!
//! Handles config file loading. Config is stored at
//! ~/.config/detailcast/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::SHARED_ELEMENT_MIN_TIER;

/// Environment override for the platform tier
pub const PLATFORM_TIER_ENV: &str = "DETAILCAST_PLATFORM_TIER";

/// Terminal width at which the large-screen layout kicks in
pub const DEFAULT_LARGE_SCREEN_COLUMNS: u16 = 120;

/// Log filter when neither RUST_LOG nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Platform capability tier reported to the detail screen
    pub platform_tier: Option<u32>,
    /// Minimum terminal width treated as a large screen
    pub large_screen_min_columns: Option<u16>,
    /// tracing-subscriber filter directive (e.g. "detailcast=debug")
    pub log_filter: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/detailcast/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("detailcast").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Save config to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Platform tier with fallback chain:
    /// 1. Environment variable DETAILCAST_PLATFORM_TIER
    /// 2. Config file
    /// 3. The lowest tier with shared-element transitions
    pub fn platform_tier(&self) -> u32 {
        if let Some(tier) = std::env::var(PLATFORM_TIER_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            return tier;
        }

        self.platform_tier.unwrap_or(SHARED_ELEMENT_MIN_TIER)
    }

    pub fn large_screen_min_columns(&self) -> u16 {
        self.large_screen_min_columns
            .unwrap_or(DEFAULT_LARGE_SCREEN_COLUMNS)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.platform_tier.is_none());
        assert_eq!(config.large_screen_min_columns(), 120);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_config_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            platform_tier: Some(19),
            large_screen_min_columns: Some(160),
            log_filter: Some("detailcast=debug".into()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "large_screen_min_columns = 100\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.large_screen_min_columns(), 100);
        assert!(loaded.platform_tier.is_none());
    }

    #[test]
    fn test_invalid_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "platform_tier = \"high\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
