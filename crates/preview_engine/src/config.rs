use std::time::Duration;

use preview_logging::LogSettings;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid preview configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Whether the caller can afford a bounded wait on the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Rendering on an interactive path: never wait, always go provisional.
    Interactive,
    Background,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Show restriction reasons instead of restricted content.
    pub restrict_content: bool,
    /// Upper bound for local lookups of pinned and game messages in
    /// [`LookupMode::Background`].
    pub local_lookup_timeout_ms: u64,
    pub logging: LogSettings,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            restrict_content: false,
            local_lookup_timeout_ms: 0,
            logging: LogSettings::default(),
        }
    }
}

impl PreviewConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn local_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.local_lookup_timeout_ms)
    }

    /// Installs the global logger from the `logging` section.
    pub fn init_logging(&self) -> bool {
        preview_logging::initialize(&self.logging)
    }
}
