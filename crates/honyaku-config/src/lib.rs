use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::hotkeys::HotkeyConfig;
use self::ocr::OcrConfig;
use self::overlay::OverlayConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;
use self::watch::WatchConfig;

pub mod hotkeys;
pub mod ocr;
pub mod overlay;
pub mod translator;
pub mod ui;
pub mod watch;

pub use self::ui::FontRange;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub translator: TranslatorConfig,
    pub watch: WatchConfig,
    pub ui: UiConfig,
    pub overlay: OverlayConfig,
    pub hotkeys: HotkeyConfig,
    /// Where watch/overlay regions are remembered, config dir when unset
    pub positions_file: Option<PathBuf>,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `HONYAKU_*` overrides through `lookup`; unparsable values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ms) = lookup("HONYAKU_WATCH_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.watch.interval_ms = ms;
        }

        if let Some(threshold) =
            lookup("HONYAKU_LANGUAGE_THRESHOLD").and_then(|v| v.parse().ok())
        {
            self.watch.language_threshold = threshold;
        }

        if let Some(key) = lookup("HONYAKU_TRANSLATOR_API_KEY") {
            self.translator.api_key = key;
        }

        if let Some(lang) = lookup("HONYAKU_FROM_LANG") {
            self.translator.from_lang = lang;
        }

        if let Some(lang) = lookup("HONYAKU_TO_LANG") {
            self.translator.to_lang = lang;
        }

        if let Some(lang) = lookup("HONYAKU_OCR_LANGUAGE") {
            self.ocr.language = lang;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use honyaku_types::SourceScript;

    use super::*;
    use crate::ocr::OcrBackend;
    use crate::translator::TranslatorProvider;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.ocr.backend, OcrBackend::Tesseract);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.translator.provider, TranslatorProvider::Google);
        assert_eq!(config.translator.from_lang, "en");
        assert_eq!(config.translator.to_lang, "th");
        assert_eq!(config.watch.interval_ms, 2000);
        assert!((config.watch.language_threshold - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.watch.source_script, SourceScript::Latin);
        assert_eq!(config.watch.history_reset_secs, 60);
        assert_eq!(config.ui.original_font, FontRange::new(12, 26));
        assert_eq!(config.ui.translation_font, FontRange::new(12, 24));
        assert_eq!(config.overlay.font, FontRange::new(14, 32));
        assert_eq!(config.overlay.min_width, 120);
        assert_eq!(config.overlay.min_height, 60);
        assert_eq!(config.hotkeys.single_capture, "Ctrl+Shift+Q");
        assert!(config.positions_file.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "translator": { "provider": "deepl", "to_lang": "de" },
            "watch": { "interval_ms": 500, "source_script": "cyrillic" }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.translator.provider, TranslatorProvider::DeepL);
        assert_eq!(config.translator.to_lang, "de");
        assert_eq!(config.translator.from_lang, "en");
        assert_eq!(config.watch.interval_ms, 500);
        assert_eq!(config.watch.source_script, SourceScript::Cyrillic);
        assert_eq!(config.watch.history_reset_secs, 60);
        assert_eq!(config.ocr.language, "eng");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HONYAKU_WATCH_INTERVAL_MS", "750"),
            ("HONYAKU_TO_LANG", "ja"),
            ("HONYAKU_LANGUAGE_THRESHOLD", "not a number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.watch.interval_ms, 750);
        assert_eq!(config.translator.to_lang, "ja");
        assert!((config.watch.language_threshold - 0.3).abs() < f32::EPSILON);
    }
}
