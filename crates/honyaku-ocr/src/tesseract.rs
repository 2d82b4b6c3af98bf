use honyaku_core::{Frame, OcrEngine, OcrError};
use rusty_tesseract::{Args, Image};

use crate::png::frame_image;

/// Runs the `tesseract` executable found on `PATH`
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    /// Page segmentation mode, 6 treats the capture as one block of text
    psm: i32,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self { psm: 6 }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn probe(&self) -> Result<String, OcrError> {
        let version = rusty_tesseract::get_tesseract_version()
            .map_err(|e| OcrError::Unavailable(format!("tesseract not found: {e}")))?;
        Ok(format!("tesseract {}", version.trim()))
    }

    fn recognize(&self, frame: &Frame, language: &str) -> Result<String, OcrError> {
        let image = frame_image(frame)?;

        // tesseract reads from disk; the file lives until the end of this call
        let file = tempfile::Builder::new()
            .prefix("honyaku-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Recognition(format!("cannot create temp file: {e}")))?;
        image
            .save_with_format(file.path(), image::ImageFormat::Png)
            .map_err(|e| OcrError::Recognition(format!("cannot write capture: {e}")))?;

        let input = Image::from_path(file.path())
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        let args = Args {
            lang: language.to_string(),
            psm: Some(self.psm),
            ..Args::default()
        };

        let text = rusty_tesseract::image_to_string(&input, &args)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        tracing::debug!("tesseract read {} chars", text.chars().count());
        Ok(text)
    }
}
