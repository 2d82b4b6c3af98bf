//! Drag-to-select protocol for screen regions.
//!
//! The selector is generic over what happens with the result: `begin`
//! stores an action value and `pointer_up` hands it back together with the
//! box. The selector is already idle at that point, so the caller may start
//! the next selection right away (watch region, then overlay region).

use honyaku_types::BoundingBox;

use crate::error::SurfaceError;

/// Full-screen capture surface the user drags on
pub trait SelectionSurface {
    fn show(&mut self) -> Result<(), SurfaceError>;

    /// Draw the rubber band between two screen points
    fn draw_preview(&mut self, anchor: (i32, i32), current: (i32, i32));

    fn clear_preview(&mut self);

    fn hide(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorPhase {
    Idle,
    Armed,
    Dragging,
}

enum State<T> {
    Idle,
    Armed { action: T },
    Dragging { action: T, anchor: (i32, i32) },
}

pub struct RegionSelector<S, T> {
    surface: S,
    state: State<T>,
}

impl<S: SelectionSurface, T> RegionSelector<S, T> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: State::Idle,
        }
    }

    pub fn phase(&self) -> SelectorPhase {
        match self.state {
            State::Idle => SelectorPhase::Idle,
            State::Armed { .. } => SelectorPhase::Armed,
            State::Dragging { .. } => SelectorPhase::Dragging,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show the capture surface. Returns `false` without doing anything
    /// while another selection is in progress.
    pub fn begin(&mut self, on_selected: T) -> bool {
        if self.is_active() {
            tracing::debug!("selection already in progress, ignoring begin");
            return false;
        }

        if let Err(e) = self.surface.show() {
            tracing::error!("cannot show selection surface: {e}");
            return false;
        }

        tracing::info!("selection surface shown");
        self.state = State::Armed { action: on_selected };
        true
    }

    pub fn pointer_down(&mut self, point: (i32, i32)) {
        self.state = match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => State::Idle,
            State::Armed { action } | State::Dragging { action, .. } => {
                self.surface.clear_preview();
                State::Dragging {
                    action,
                    anchor: point,
                }
            }
        };
    }

    pub fn pointer_move(&mut self, point: (i32, i32)) {
        if let State::Dragging { anchor, .. } = self.state {
            self.surface.draw_preview(anchor, point);
        }
    }

    /// Finish the drag. Too-small boxes are dropped silently.
    pub fn pointer_up(&mut self, point: (i32, i32)) -> Option<(T, BoundingBox)> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        if matches!(state, State::Idle) {
            return None;
        }

        self.surface.clear_preview();
        self.surface.hide();

        let State::Dragging { action, anchor } = state else {
            tracing::debug!("pointer released without a press, selection closed");
            return None;
        };

        match BoundingBox::from_corners(anchor, point) {
            Ok(bbox) => {
                tracing::info!("selected region {bbox}");
                Some((action, bbox))
            }
            Err(e) => {
                tracing::info!("selection ignored: {e}");
                None
            }
        }
    }

    /// Abort without a result, e.g. on Escape
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.state = State::Idle;
            self.surface.clear_preview();
            self.surface.hide();
            tracing::info!("selection cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeSurface {
        visible: bool,
        shows: usize,
        preview: Option<((i32, i32), (i32, i32))>,
        fail_show: bool,
    }

    impl SelectionSurface for FakeSurface {
        fn show(&mut self) -> Result<(), SurfaceError> {
            if self.fail_show {
                return Err(SurfaceError("no display".into()));
            }
            self.visible = true;
            self.shows += 1;
            Ok(())
        }

        fn draw_preview(&mut self, anchor: (i32, i32), current: (i32, i32)) {
            self.preview = Some((anchor, current));
        }

        fn clear_preview(&mut self) {
            self.preview = None;
        }

        fn hide(&mut self) {
            self.visible = false;
        }
    }

    fn drag(
        selector: &mut RegionSelector<FakeSurface, &'static str>,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Option<(&'static str, BoundingBox)> {
        selector.pointer_down(from);
        selector.pointer_move(to);
        selector.pointer_up(to)
    }

    #[test]
    fn test_reversed_drag_is_normalized() {
        let mut selector = RegionSelector::new(FakeSurface::default());
        assert!(selector.begin("single"));

        let (action, bbox) = drag(&mut selector, (200, 200), (50, 80)).unwrap();
        assert_eq!(action, "single");
        assert_eq!(bbox.as_array(), [50, 80, 200, 200]);
        assert!(!selector.surface().visible);
        assert_eq!(selector.phase(), SelectorPhase::Idle);
    }

    #[test]
    fn test_small_drags_never_complete() {
        for (dx, dy) in [(0, 50), (4, 50), (50, 4), (-4, -50), (4, 4)] {
            let mut selector = RegionSelector::new(FakeSurface::default());
            selector.begin("single");
            let result = drag(&mut selector, (100, 100), (100 + dx, 100 + dy));
            assert!(result.is_none(), "({dx}, {dy}) should be rejected");
            assert!(!selector.surface().visible);
            assert!(!selector.is_active());
        }
    }

    #[test]
    fn test_begin_while_armed_is_noop() {
        let mut selector = RegionSelector::new(FakeSurface::default());
        assert!(selector.begin("first"));
        selector.pointer_down((0, 0));
        assert!(!selector.begin("second"));
        assert_eq!(selector.surface().shows, 1);

        let (action, _) = selector.pointer_up((100, 100)).unwrap();
        assert_eq!(action, "first");
    }

    #[test]
    fn test_preview_tracks_pointer() {
        let mut selector = RegionSelector::new(FakeSurface::default());
        selector.begin("single");

        selector.pointer_move((5, 5));
        assert!(selector.surface().preview.is_none());

        selector.pointer_down((10, 20));
        assert_eq!(selector.phase(), SelectorPhase::Dragging);
        selector.pointer_move((30, 40));
        assert_eq!(selector.surface().preview, Some(((10, 20), (30, 40))));
        selector.pointer_move((60, 70));
        assert_eq!(selector.surface().preview, Some(((10, 20), (60, 70))));
    }

    #[test]
    fn test_chained_selection() {
        let mut selector = RegionSelector::new(FakeSurface::default());
        selector.begin("watch");

        let (action, watch) = drag(&mut selector, (0, 0), (300, 100)).unwrap();
        assert_eq!(action, "watch");
        assert!(selector.begin("overlay"));

        let (action, overlay) = drag(&mut selector, (400, 400), (600, 500)).unwrap();
        assert_eq!(action, "overlay");
        assert_ne!(watch, overlay);
        assert_eq!(selector.surface().shows, 2);
    }

    #[test]
    fn test_release_without_press_closes() {
        let mut selector = RegionSelector::new(FakeSurface::default());
        selector.begin("single");
        assert!(selector.pointer_up((100, 100)).is_none());
        assert!(!selector.surface().visible);
        assert!(selector.begin("single"));
    }

    #[test]
    fn test_cancel_and_failed_show() {
        let mut selector = RegionSelector::new(FakeSurface::default());
        selector.begin("single");
        selector.pointer_down((0, 0));
        selector.cancel();
        assert!(!selector.is_active());
        assert!(selector.pointer_up((100, 100)).is_none());

        let mut broken = RegionSelector::<_, &str>::new(FakeSurface {
            fail_show: true,
            ..Default::default()
        });
        assert!(!broken.begin("single"));
        assert_eq!(broken.phase(), SelectorPhase::Idle);
    }
}
