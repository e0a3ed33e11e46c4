//! Engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the user override (~/.config/ember/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Every key is optional; missing keys keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub weekly_lookback_days: u32,
    pub monthly_lookback_days: u32,
    pub burnout_window_days: u32,
    /// Whether surfaced insights are written as events
    pub record_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weekly_lookback_days: 14,
            monthly_lookback_days: 45,
            burnout_window_days: 7,
            record_events: true,
        }
    }
}

impl EngineConfig {
    /// Load from `path` if given and present, else the user override, else
    /// the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let content = match candidate {
            Some(p) if p.exists() => {
                tracing::debug!(path = %p.display(), "Loading engine config");
                fs::read_to_string(&p)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ember").join("engine.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    windows: Option<RawWindows>,
    events: Option<RawEvents>,
}

#[derive(Debug, Deserialize)]
struct RawWindows {
    weekly_lookback_days: Option<u32>,
    monthly_lookback_days: Option<u32>,
    burnout_window_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawEvents {
    record: Option<bool>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(windows) = raw.windows {
        if let Some(days) = windows.weekly_lookback_days {
            config.weekly_lookback_days = days;
        }
        if let Some(days) = windows.monthly_lookback_days {
            config.monthly_lookback_days = days;
        }
        if let Some(days) = windows.burnout_window_days {
            config.burnout_window_days = days;
        }
    }

    if let Some(events) = raw.events {
        if let Some(record) = events.record {
            config.record_events = record;
        }
    }

    if config.weekly_lookback_days == 0
        || config.monthly_lookback_days == 0
        || config.burnout_window_days == 0
    {
        return Err(Error::Config("lookback windows must be at least one day".to_string()));
    }

    Ok(config)
}
