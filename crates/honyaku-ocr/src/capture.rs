use honyaku_core::{CaptureError, CaptureSource, Frame};
use honyaku_types::BoundingBox;
use xcap::Monitor;

/// Captures the monitor holding the region's top-left corner, cropped to the region
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenCapture;

impl ScreenCapture {
    pub fn new() -> Self {
        Self
    }
}

fn backend(e: impl std::fmt::Display) -> CaptureError {
    CaptureError::Backend(e.to_string())
}

impl CaptureSource for ScreenCapture {
    fn grab(&self, region: BoundingBox) -> Result<Frame, CaptureError> {
        let monitors = Monitor::all().map_err(backend)?;

        let monitor = monitors
            .iter()
            .find(|m| {
                region.x1() >= m.x()
                    && region.y1() >= m.y()
                    && region.x1() < m.x() + m.width() as i32
                    && region.y1() < m.y() + m.height() as i32
            })
            .ok_or(CaptureError::NoMonitor(region))?;

        let image = monitor.capture_image().map_err(backend)?;

        let left = (region.x1() - monitor.x()) as u32;
        let top = (region.y1() - monitor.y()) as u32;
        if left >= image.width() || top >= image.height() {
            return Err(CaptureError::NoMonitor(region));
        }
        let width = region.width().min(image.width() - left);
        let height = region.height().min(image.height() - top);

        let cropped = xcap::image::imageops::crop_imm(&image, left, top, width, height).to_image();
        tracing::trace!("captured {width}x{height} at {region}");

        Ok(Frame {
            width: cropped.width(),
            height: cropped.height(),
            rgba: cropped.into_raw(),
        })
    }
}
