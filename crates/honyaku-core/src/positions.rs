//! Remembered watch/overlay regions.
//!
//! Stored as `{ "watch_bbox": [x1, y1, x2, y2], "overlay_bbox": [...] }`.
//! Anything unreadable counts as "nothing saved".

use std::fs;
use std::path::{Path, PathBuf};

use honyaku_types::{BoundingBox, PositionRecord};

use crate::error::StoreError;

pub const POSITIONS_FILE: &str = "watch_positions.json";

pub struct PositionStore {
    path: PathBuf,
}

impl PositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<PositionRecord> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("no saved positions at {}: {e}", self.path.display());
                return None;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("ignoring unreadable {}: {e}", self.path.display());
                return None;
            }
        };

        let field = |name: &str| {
            value
                .get(name)
                .and_then(|v| serde_json::from_value::<BoundingBox>(v.clone()).ok())
        };

        match (field("watch_bbox"), field("overlay_bbox")) {
            (Some(watch_bbox), Some(overlay_bbox)) => {
                tracing::info!("loaded saved positions from {}", self.path.display());
                Some(PositionRecord {
                    watch_bbox,
                    overlay_bbox,
                })
            }
            _ => {
                tracing::warn!("{} is missing a region, ignoring it", self.path.display());
                None
            }
        }
    }

    /// Overwrite the record. Does nothing and returns `Ok(None)` unless both
    /// regions are known.
    pub fn save(
        &self,
        watch: Option<BoundingBox>,
        overlay: Option<BoundingBox>,
    ) -> Result<Option<PositionRecord>, StoreError> {
        let (Some(watch_bbox), Some(overlay_bbox)) = (watch, overlay) else {
            return Ok(None);
        };

        let record = PositionRecord {
            watch_bbox,
            overlay_bbox,
        };
        let json = serde_json::to_string_pretty(&record)?;

        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, json).map_err(io_error)?;

        tracing::info!("saved watch positions to {}", self.path.display());
        Ok(Some(record))
    }
}
