use std::path::PathBuf;

use honyaku_translator::TranslateError;
use honyaku_types::BoundingBox;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no monitor found for region {0}")]
    NoMonitor(BoundingBox),

    #[error("screen capture failed: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Failure of a single watch or capture cycle
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),

    #[error("capture task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode positions: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("window error: {0}")]
pub struct SurfaceError(pub String);
