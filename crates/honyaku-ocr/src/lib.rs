use std::sync::Arc;

use honyaku_config::ocr::{OcrBackend, OcrConfig};
use honyaku_core::OcrEngine;

mod capture;
mod hotkey;
mod png;
mod tesseract;

#[cfg(windows)]
mod com;
#[cfg(windows)]
mod ocr;

pub use capture::ScreenCapture;
pub use hotkey::{HotkeyBindings, HotkeyMap, parse_hotkey};
pub use png::{encode_png, frame_image};
pub use tesseract::TesseractOcr;

#[cfg(windows)]
pub use com::ComGuard;
#[cfg(windows)]
pub use ocr::WindowsOcr;

/// Build the recognition engine selected in the config
pub fn ocr_engine(config: &OcrConfig) -> anyhow::Result<Arc<dyn OcrEngine>> {
    match config.backend {
        OcrBackend::Tesseract => Ok(Arc::new(TesseractOcr::new())),
        #[cfg(windows)]
        OcrBackend::Windows => Ok(Arc::new(WindowsOcr::new())),
        #[cfg(not(windows))]
        OcrBackend::Windows => anyhow::bail!("Windows OCR is only available on Windows"),
    }
}
