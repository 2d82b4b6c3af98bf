use serde::{Deserialize, Serialize};

fn default_single_capture() -> String {
    "Ctrl+Shift+Q".to_string()
}

fn default_start_watch() -> String {
    "Ctrl+Shift+W".to_string()
}

fn default_stop_watch() -> String {
    "Ctrl+Shift+E".to_string()
}

/// Global key combinations, written like "Ctrl+Shift+Q"
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HotkeyConfig {
    #[serde(default = "default_single_capture")]
    pub single_capture: String,
    #[serde(default = "default_start_watch")]
    pub start_watch: String,
    #[serde(default = "default_stop_watch")]
    pub stop_watch: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            single_capture: default_single_capture(),
            start_watch: default_start_watch(),
            stop_watch: default_stop_watch(),
        }
    }
}
