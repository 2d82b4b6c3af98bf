//! Slint windows behind the core surface traits

use honyaku_core::{OverlayGeometry, OverlaySurface, SelectionSurface, SurfaceError};
use slint::{ComponentHandle, PhysicalPosition, PhysicalSize};

use crate::{OverlayWindow, SelectionWindow};

fn surface_error(e: impl std::fmt::Display) -> SurfaceError {
    SurfaceError(e.to_string())
}

pub struct SlintSelection {
    window: SelectionWindow,
}

impl SlintSelection {
    pub fn new(window: SelectionWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &SelectionWindow {
        &self.window
    }

    pub fn set_prompt(&self, prompt: &str) {
        self.window.set_prompt(prompt.into());
    }
}

/// Window-local logical point to screen pixels
pub fn to_screen(window: &slint::Window, x: f32, y: f32) -> (i32, i32) {
    let scale = window.scale_factor();
    let origin = window.position();
    (
        origin.x + (x * scale).round() as i32,
        origin.y + (y * scale).round() as i32,
    )
}

fn to_local(window: &slint::Window, point: (i32, i32)) -> (f32, f32) {
    let scale = window.scale_factor();
    let origin = window.position();
    (
        (point.0 - origin.x) as f32 / scale,
        (point.1 - origin.y) as f32 / scale,
    )
}

impl SelectionSurface for SlintSelection {
    fn show(&mut self) -> Result<(), SurfaceError> {
        self.window.set_preview_visible(false);
        self.window.window().set_fullscreen(true);
        self.window.show().map_err(surface_error)
    }

    fn draw_preview(&mut self, anchor: (i32, i32), current: (i32, i32)) {
        let window = self.window.window();
        let (ax, ay) = to_local(window, anchor);
        let (cx, cy) = to_local(window, current);

        self.window.set_preview_x(ax.min(cx));
        self.window.set_preview_y(ay.min(cy));
        self.window.set_preview_width((ax - cx).abs());
        self.window.set_preview_height((ay - cy).abs());
        self.window.set_preview_visible(true);
    }

    fn clear_preview(&mut self) {
        self.window.set_preview_visible(false);
    }

    fn hide(&mut self) {
        if let Err(e) = self.window.hide() {
            tracing::warn!("cannot hide selection window: {e}");
        }
    }
}

pub struct SlintOverlay {
    window: OverlayWindow,
}

impl SlintOverlay {
    pub fn new(window: OverlayWindow, opacity: f32) -> Self {
        window.set_opacity_level(opacity.clamp(0.0, 1.0));
        Self { window }
    }
}

impl OverlaySurface for SlintOverlay {
    fn open(&mut self, geometry: OverlayGeometry) -> Result<(), SurfaceError> {
        let window = self.window.window();
        let scale = window.scale_factor();

        window.set_position(PhysicalPosition::new(geometry.x, geometry.y));
        window.set_size(PhysicalSize::new(geometry.width, geometry.height));
        self.window.set_wrap_width(geometry.wrap_width as f32 / scale);
        self.window.set_text("".into());
        self.window.show().map_err(surface_error)
    }

    fn set_text(&mut self, text: &str, font_size: u32) {
        self.window.set_text(text.into());
        self.window.set_font_size(font_size as i32);
    }

    fn close(&mut self) {
        if let Err(e) = self.window.hide() {
            tracing::warn!("cannot hide overlay: {e}");
        }
    }
}
