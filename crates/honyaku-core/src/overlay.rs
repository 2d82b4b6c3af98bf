use honyaku_config::FontRange;
use honyaku_types::BoundingBox;

use crate::error::SurfaceError;
use crate::font::auto_font_size;

/// Placement of the overlay window in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Line width the label wraps at
    pub wrap_width: u32,
}

impl OverlayGeometry {
    /// Anchor at the region's top-left corner, never smaller than `min_size`
    pub fn for_region(region: BoundingBox, min_size: (u32, u32)) -> Self {
        let width = region.width().max(min_size.0);
        let height = region.height().max(min_size.1);

        Self {
            x: region.x1(),
            y: region.y1(),
            width,
            height,
            wrap_width: width.saturating_sub(20).max(50),
        }
    }
}

/// Borderless, always-on-top, semi-transparent window with one label
pub trait OverlaySurface {
    fn open(&mut self, geometry: OverlayGeometry) -> Result<(), SurfaceError>;

    fn set_text(&mut self, text: &str, font_size: u32);

    fn close(&mut self);
}

pub struct OverlayRenderer<S> {
    surface: S,
    font: FontRange,
    min_size: (u32, u32),
    geometry: Option<OverlayGeometry>,
    text: String,
}

impl<S: OverlaySurface> OverlayRenderer<S> {
    pub fn new(surface: S, font: FontRange, min_size: (u32, u32)) -> Self {
        Self {
            surface,
            font,
            min_size,
            geometry: None,
            text: String::new(),
        }
    }

    /// Replace any open overlay with a new one over `region`
    pub fn create(&mut self, region: BoundingBox) -> Result<OverlayGeometry, SurfaceError> {
        self.destroy();

        let geometry = OverlayGeometry::for_region(region, self.min_size);
        self.surface.open(geometry)?;
        self.geometry = Some(geometry);
        tracing::info!(
            "overlay opened at ({}, {}) {}x{}",
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height
        );
        Ok(geometry)
    }

    /// Returns `false` when no overlay is open
    pub fn update(&mut self, text: &str) -> bool {
        if self.geometry.is_none() {
            return false;
        }

        let size = auto_font_size(text, self.font);
        self.surface.set_text(text, size);
        self.text = text.to_string();
        true
    }

    pub fn destroy(&mut self) {
        if self.geometry.take().is_some() {
            self.surface.close();
            self.text.clear();
            tracing::info!("overlay closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn geometry(&self) -> Option<OverlayGeometry> {
        self.geometry
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeOverlay {
        opened: Vec<OverlayGeometry>,
        closes: usize,
        label: Option<(String, u32)>,
    }

    impl OverlaySurface for FakeOverlay {
        fn open(&mut self, geometry: OverlayGeometry) -> Result<(), SurfaceError> {
            self.opened.push(geometry);
            Ok(())
        }

        fn set_text(&mut self, text: &str, font_size: u32) {
            self.label = Some((text.to_string(), font_size));
        }

        fn close(&mut self) {
            self.closes += 1;
        }
    }

    fn renderer() -> OverlayRenderer<FakeOverlay> {
        OverlayRenderer::new(FakeOverlay::default(), FontRange::new(14, 32), (120, 60))
    }

    #[test]
    fn test_geometry_has_minimum_size() {
        let small = BoundingBox::new(100, 200, 150, 220).unwrap();
        let geometry = OverlayGeometry::for_region(small, (120, 60));
        assert_eq!(
            geometry,
            OverlayGeometry {
                x: 100,
                y: 200,
                width: 120,
                height: 60,
                wrap_width: 100,
            }
        );

        let large = BoundingBox::new(0, 0, 800, 300).unwrap();
        let geometry = OverlayGeometry::for_region(large, (120, 60));
        assert_eq!((geometry.width, geometry.height), (800, 300));
        assert_eq!(geometry.wrap_width, 780);
    }

    #[test]
    fn test_create_replaces_previous() {
        let mut overlay = renderer();
        overlay.create(BoundingBox::new(0, 0, 200, 100).unwrap()).unwrap();
        overlay.create(BoundingBox::new(10, 10, 300, 200).unwrap()).unwrap();

        assert_eq!(overlay.surface().opened.len(), 2);
        assert_eq!(overlay.surface().closes, 1);
        assert_eq!(overlay.geometry().map(|g| g.x), Some(10));
    }

    #[test]
    fn test_update_sets_text_and_font() {
        let mut overlay = renderer();
        assert!(!overlay.update("ignored"));
        assert!(overlay.surface().label.is_none());

        overlay.create(BoundingBox::new(0, 0, 200, 100).unwrap()).unwrap();
        assert!(overlay.update("สวัสดีโลก"));
        assert_eq!(overlay.surface().label, Some(("สวัสดีโลก".to_string(), 31)));
        assert_eq!(overlay.text(), "สวัสดีโลก");

        overlay.update("");
        assert_eq!(overlay.surface().label, Some((String::new(), 32)));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut overlay = renderer();
        overlay.destroy();
        assert_eq!(overlay.surface().closes, 0);

        overlay.create(BoundingBox::new(0, 0, 200, 100).unwrap()).unwrap();
        overlay.destroy();
        overlay.destroy();
        assert_eq!(overlay.surface().closes, 1);
        assert!(!overlay.is_open());
    }
}
