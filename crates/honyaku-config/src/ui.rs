use serde::{Deserialize, Serialize};

/// Inclusive font size bounds, in points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRange {
    pub min: u32,
    pub max: u32,
}

impl FontRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

fn default_original_font() -> FontRange {
    FontRange::new(12, 26)
}

fn default_translation_font() -> FontRange {
    FontRange::new(12, 24)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_original_font")]
    pub original_font: FontRange,
    #[serde(default = "default_translation_font")]
    pub translation_font: FontRange,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            original_font: default_original_font(),
            translation_font: default_translation_font(),
        }
    }
}
