//! Task store configuration.
//!
//! Hosts either build a [`StoreConfig`] in code or load one from JSON:
//!
//! ```
//! use focusboard::config::StoreConfig;
//! use std::time::Duration;
//!
//! let config = StoreConfig::from_json(r#"{"priorityRefreshDelayMs": 250}"#)?;
//! assert_eq!(config.storage_slot, "task-store");
//! assert_eq!(config.priority_refresh_delay, Duration::from_millis(250));
//! # Ok::<(), focusboard::config::ConfigError>(())
//! ```

use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

/// Slot the store document is saved under unless configured otherwise.
pub const DEFAULT_STORAGE_SLOT: &str = "task-store";

/// Settings for opening a task store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Persistence slot holding the serialized store document.
    pub storage_slot: String,
    /// Debounce applied before the priority refresh scheduled by `add_task`.
    #[serde(
        rename = "priorityRefreshDelayMs",
        deserialize_with = "deserialize_millis"
    )]
    pub priority_refresh_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_slot: DEFAULT_STORAGE_SLOT.to_owned(),
            priority_refresh_delay: Duration::ZERO,
        }
    }
}

impl StoreConfig {
    /// Parses a configuration document, defaulting absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields,
    /// and [`ConfigError::EmptySlot`] when the slot name is blank.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        if config.storage_slot.trim().is_empty() {
            return Err(ConfigError::EmptySlot);
        }
        Ok(config)
    }

    /// Sets the persistence slot.
    #[must_use]
    pub fn with_storage_slot(mut self, slot: impl Into<String>) -> Self {
        self.storage_slot = slot.into();
        self
    }

    /// Sets the priority refresh debounce.
    #[must_use]
    pub const fn with_priority_refresh_delay(mut self, delay: Duration) -> Self {
        self.priority_refresh_delay = delay;
        self
    }
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid store configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The storage slot name is blank.
    #[error("storage slot must not be empty")]
    EmptySlot,
}
