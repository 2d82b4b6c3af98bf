use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "eng".to_string()
}

/// Recognition engine to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    /// `tesseract` binary on PATH
    #[default]
    Tesseract,
    /// Windows.Media.Ocr, only available on Windows
    Windows,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    pub backend: OcrBackend,
    /// Engine language code, e.g. "eng" for Tesseract or "en" for Windows OCR
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackend::default(),
            language: default_language(),
        }
    }
}
