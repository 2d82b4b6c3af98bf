//! UI-thread view of everything the backend reports.
//!
//! The presenter owns panel contents and the overlay and applies
//! [`UiMessage`]s in arrival order. Messages tagged with a session other
//! than the active one are dropped, so a superseded worker cannot touch the
//! screen once a newer session has started.

use honyaku_config::{Config, FontRange};
use honyaku_types::{NoticeLevel, PositionRecord, SelectionPurpose, SessionId, UiMessage};

use crate::font::auto_font_size;
use crate::overlay::{OverlayRenderer, OverlaySurface};

#[derive(Debug, Clone, Copy)]
pub struct PresenterConfig {
    pub original_font: FontRange,
    pub translation_font: FontRange,
    pub overlay_font: FontRange,
    pub overlay_min_size: (u32, u32),
}

impl PresenterConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            original_font: config.ui.original_font,
            translation_font: config.ui.translation_font,
            overlay_font: config.overlay.font,
            overlay_min_size: (config.overlay.min_width, config.overlay.min_height),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    pub text: String,
    pub font_size: u32,
    pub scroll_to_end: bool,
}

/// What the UI has to do after a message was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Panels or labels changed
    Refresh,
    Ignored,
    BeginSelection(SelectionPurpose),
    /// The backend is done, windows may be released
    Exit,
    Notice {
        level: NoticeLevel,
        title: String,
        message: String,
    },
}

pub struct Presenter<O> {
    config: PresenterConfig,
    original: Panel,
    translation: Panel,
    overlay: OverlayRenderer<O>,
    active_session: Option<SessionId>,
    saved: Option<PositionRecord>,
    status: String,
}

impl<O: OverlaySurface> Presenter<O> {
    pub fn new(config: PresenterConfig, overlay: O) -> Self {
        Self {
            original: Panel {
                font_size: config.original_font.max,
                ..Default::default()
            },
            translation: Panel {
                font_size: config.translation_font.max,
                ..Default::default()
            },
            overlay: OverlayRenderer::new(overlay, config.overlay_font, config.overlay_min_size),
            active_session: None,
            saved: None,
            status: String::new(),
            config,
        }
    }

    pub fn apply(&mut self, message: UiMessage) -> Reaction {
        if let Some(session) = message.session() {
            if self.active_session != Some(session) {
                tracing::debug!("dropping message from inactive session {session}");
                return Reaction::Ignored;
            }
        }

        match message {
            UiMessage::BackendReady => {
                self.status = "Ready".to_string();
            }
            UiMessage::BackendStopped => {
                self.shutdown();
                return Reaction::Exit;
            }
            UiMessage::WatchStarted {
                session,
                region,
                overlay,
            } => {
                self.active_session = Some(session);
                self.status = match overlay {
                    Some(overlay) => format!("Watching {region}, overlay at {overlay}"),
                    None => format!("Watching {region}"),
                };
            }
            UiMessage::WatchStopped { session } => {
                if self.active_session != Some(session) {
                    return Reaction::Ignored;
                }
                self.active_session = None;
                self.overlay.destroy();
                self.status = "Watch stopped".to_string();
            }
            UiMessage::OriginalText { text, .. } => {
                self.original = Panel {
                    font_size: auto_font_size(&text, self.config.original_font),
                    text,
                    scroll_to_end: false,
                };
            }
            UiMessage::Translation {
                text,
                scroll_to_end,
                ..
            } => {
                self.translation = Panel {
                    font_size: auto_font_size(&text, self.config.translation_font),
                    text,
                    scroll_to_end,
                };
            }
            UiMessage::OverlayOpen { region, .. } => {
                if let Err(e) = self.overlay.create(region) {
                    tracing::error!("cannot open overlay: {e}");
                    return Reaction::Notice {
                        level: NoticeLevel::Warning,
                        title: "Overlay unavailable".to_string(),
                        message: e.to_string(),
                    };
                }
            }
            UiMessage::OverlayText { text, .. } => {
                self.overlay.update(&text);
            }
            UiMessage::BeginSelection(purpose) => return Reaction::BeginSelection(purpose),
            UiMessage::SavedPositions(saved) => {
                self.saved = saved;
            }
            UiMessage::Status(status) => {
                self.status = status;
            }
            UiMessage::Notice {
                level,
                title,
                message,
            } => {
                return Reaction::Notice {
                    level,
                    title,
                    message,
                };
            }
        }

        Reaction::Refresh
    }

    pub fn original(&self) -> &Panel {
        &self.original
    }

    pub fn translation(&self) -> &Panel {
        &self.translation
    }

    pub fn overlay(&self) -> &OverlayRenderer<O> {
        &self.overlay
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active_session
    }

    pub fn saved(&self) -> Option<PositionRecord> {
        self.saved
    }

    pub fn saved_label(&self) -> String {
        match self.saved {
            Some(record) => format!(
                "watch: {} | overlay: {}",
                record.watch_bbox, record.overlay_bbox
            ),
            None => "No saved position".to_string(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Close the overlay before the UI releases its windows
    pub fn shutdown(&mut self) {
        self.active_session = None;
        self.overlay.destroy();
    }
}

#[cfg(test)]
mod tests {
    use honyaku_types::BoundingBox;

    use super::*;
    use crate::error::SurfaceError;
    use crate::overlay::OverlayGeometry;

    #[derive(Default)]
    struct FakeOverlay {
        open: bool,
        fail: bool,
    }

    impl OverlaySurface for FakeOverlay {
        fn open(&mut self, _geometry: OverlayGeometry) -> Result<(), SurfaceError> {
            if self.fail {
                return Err(SurfaceError("no compositor".into()));
            }
            self.open = true;
            Ok(())
        }

        fn set_text(&mut self, _text: &str, _font_size: u32) {}

        fn close(&mut self) {
            self.open = false;
        }
    }

    fn presenter() -> Presenter<FakeOverlay> {
        Presenter::new(
            PresenterConfig::from_config(&Config::default()),
            FakeOverlay::default(),
        )
    }

    fn region() -> BoundingBox {
        BoundingBox::new(10, 10, 310, 110).unwrap()
    }

    fn started(session: SessionId) -> UiMessage {
        UiMessage::WatchStarted {
            session,
            region: region(),
            overlay: Some(region()),
        }
    }

    #[test]
    fn test_panels_follow_messages() {
        let mut p = presenter();
        assert_eq!(p.original().font_size, 26);

        p.apply(UiMessage::OriginalText {
            session: None,
            text: "Hello world".into(),
        });
        p.apply(UiMessage::Translation {
            session: None,
            text: "สวัสดีโลก".into(),
            scroll_to_end: true,
        });

        assert_eq!(p.original().text, "Hello world");
        assert_eq!(p.original().font_size, 24);
        assert_eq!(p.translation().text, "สวัสดีโลก");
        assert!(p.translation().scroll_to_end);
    }

    #[test]
    fn test_stale_session_is_dropped() {
        let mut p = presenter();
        p.apply(started(1));
        p.apply(UiMessage::WatchStopped { session: 1 });
        p.apply(started(2));

        let late = UiMessage::Translation {
            session: Some(1),
            text: "late".into(),
            scroll_to_end: true,
        };
        assert_eq!(p.apply(late), Reaction::Ignored);
        assert_eq!(p.apply(UiMessage::WatchStopped { session: 1 }), Reaction::Ignored);
        assert_eq!(p.active_session(), Some(2));
        assert!(p.translation().text.is_empty());
    }

    #[test]
    fn test_overlay_lifecycle() {
        let mut p = presenter();
        p.apply(started(1));
        p.apply(UiMessage::OverlayOpen {
            session: 1,
            region: region(),
        });
        p.apply(UiMessage::OverlayText {
            session: 1,
            text: "สวัสดีโลก".into(),
        });
        assert!(p.overlay().surface().open);
        assert_eq!(p.overlay().text(), "สวัสดีโลก");

        p.apply(UiMessage::WatchStopped { session: 1 });
        assert!(!p.overlay().is_open());
        assert!(!p.overlay().surface().open);
    }

    #[test]
    fn test_overlay_failure_becomes_warning() {
        let mut p = Presenter::new(
            PresenterConfig::from_config(&Config::default()),
            FakeOverlay {
                fail: true,
                ..Default::default()
            },
        );
        p.apply(started(1));
        let reaction = p.apply(UiMessage::OverlayOpen {
            session: 1,
            region: region(),
        });
        assert!(matches!(
            reaction,
            Reaction::Notice {
                level: NoticeLevel::Warning,
                ..
            }
        ));
    }

    #[test]
    fn test_backend_stopped_closes_overlay() {
        let mut p = presenter();
        p.apply(started(1));
        p.apply(UiMessage::OverlayOpen {
            session: 1,
            region: region(),
        });
        assert!(p.overlay().is_open());

        assert_eq!(p.apply(UiMessage::BackendStopped), Reaction::Exit);
        assert!(!p.overlay().surface().open);
        assert_eq!(p.active_session(), None);
    }

    #[test]
    fn test_saved_label() {
        let mut p = presenter();
        assert_eq!(p.saved_label(), "No saved position");

        p.apply(UiMessage::SavedPositions(Some(PositionRecord {
            watch_bbox: region(),
            overlay_bbox: BoundingBox::new(0, 0, 50, 50).unwrap(),
        })));
        assert_eq!(
            p.saved_label(),
            "watch: (10, 10, 310, 110) | overlay: (0, 0, 50, 50)"
        );
    }

    #[test]
    fn test_selection_and_notices_pass_through() {
        let mut p = presenter();
        assert_eq!(
            p.apply(UiMessage::BeginSelection(SelectionPurpose::WatchRegion)),
            Reaction::BeginSelection(SelectionPurpose::WatchRegion)
        );
        let reaction = p.apply(UiMessage::Notice {
            level: NoticeLevel::Error,
            title: "Error".into(),
            message: "boom".into(),
        });
        assert!(matches!(reaction, Reaction::Notice { .. }));
    }
}
