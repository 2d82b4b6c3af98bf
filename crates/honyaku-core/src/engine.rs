//! Seams to the capture and recognition engines

use honyaku_types::BoundingBox;

use crate::error::{CaptureError, OcrError};

/// Captured pixels, RGBA8 row-major
#[derive(Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Grabs screen pixels. Called from blocking threads only.
pub trait CaptureSource: Send + Sync {
    fn grab(&self, region: BoundingBox) -> Result<Frame, CaptureError>;
}

/// Text recognition engine. Called from blocking threads only.
pub trait OcrEngine: Send + Sync {
    /// Check that the engine can run at all; returns a short description
    /// (engine name and version) on success.
    fn probe(&self) -> Result<String, OcrError>;

    fn recognize(&self, frame: &Frame, language: &str) -> Result<String, OcrError>;
}
