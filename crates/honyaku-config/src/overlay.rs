use serde::{Deserialize, Serialize};

use crate::ui::FontRange;

fn default_enabled() -> bool {
    true
}

fn default_font() -> FontRange {
    FontRange::new(14, 32)
}

fn default_opacity() -> f32 {
    0.9
}

fn default_min_width() -> u32 {
    120
}

fn default_min_height() -> u32 {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    /// Ask for an overlay region when starting a watch
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_font")]
    pub font: FontRange,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_min_width")]
    pub min_width: u32,
    #[serde(default = "default_min_height")]
    pub min_height: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            font: default_font(),
            opacity: default_opacity(),
            min_width: default_min_width(),
            min_height: default_min_height(),
        }
    }
}
