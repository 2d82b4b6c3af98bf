use std::time::Duration;

use honyaku_types::SourceScript;
use serde::{Deserialize, Serialize};

fn default_interval_ms() -> u64 {
    2000
}

fn default_language_threshold() -> f32 {
    0.3
}

fn default_history_reset_secs() -> u64 {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WatchConfig {
    /// Delay between two samples of the watched region
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Minimum share of source-script letters among all letters
    #[serde(default = "default_language_threshold")]
    pub language_threshold: f32,
    pub source_script: SourceScript,
    /// Inactivity after which the translation history starts over
    #[serde(default = "default_history_reset_secs")]
    pub history_reset_secs: u64,
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn history_window(&self) -> Duration {
        Duration::from_secs(self.history_reset_secs)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            language_threshold: default_language_threshold(),
            source_script: SourceScript::default(),
            history_reset_secs: default_history_reset_secs(),
        }
    }
}
