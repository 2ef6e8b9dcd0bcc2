//! Bridge configuration
//!
//! Timing for the streaming controller. The defaults mirror the source
//! behavior this bridge was built against; both values are empirical
//! debounce, not load-bearing guarantees, so they are plain tunables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable timing for the streaming controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Bounded wait on the update stream, in milliseconds. Cancellation is
    /// observed within one interval.
    pub poll_timeout_ms: u64,
    /// Grace period after cancelling a poll task, in milliseconds, letting
    /// the retiring task release the screen handle before a new one
    /// acquires it.
    pub settle_delay_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: 2000,
            settle_delay_ms: 50,
        }
    }
}

impl BridgeConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Load configuration from a file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: BridgeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from the default location or return defaults
    pub fn load_or_default() -> Self {
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                if let Ok(config) = Self::load(&config_path) {
                    return config;
                }
            }
        }
        Self::default()
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<std::path::PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| std::path::PathBuf::from(home).join(".config").join("term-bridge"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
