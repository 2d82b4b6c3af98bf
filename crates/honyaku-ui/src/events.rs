use std::cell::{Cell, RefCell};
use std::time::Duration;

use honyaku_core::{Presenter, Reaction, RegionSelector};
use honyaku_types::{AppCommand, BoundingBox, NoticeLevel, SelectionPurpose, UiMessage};
use slint::{ComponentHandle, Weak};

use crate::bridge::{CommandSender, with_context};
use crate::surfaces::{SlintOverlay, SlintSelection};
use crate::{MainWindow, NoticeWindow};

const WATCH_PROMPT: &str = "Drag to select the area to watch";
const OVERLAY_PROMPT: &str = "Select where to show the translation (overlay)";
const SINGLE_PROMPT: &str = "Drag to select the text to translate";

/// How long the windows wait for the backend to confirm it stopped
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Everything owned by the UI thread
pub struct UiContext {
    pub main: MainWindow,
    pub notice: NoticeWindow,
    pub presenter: RefCell<Presenter<SlintOverlay>>,
    pub selector: RefCell<RegionSelector<SlintSelection, SelectionPurpose>>,
    pub commands: CommandSender,
    pub overlay_enabled: bool,
    pub closing: Cell<bool>,
    pub closed: Cell<bool>,
}

impl UiContext {
    pub fn apply(&self, message: UiMessage) {
        tracing::trace!("[SLINT] {message:?}");
        let reaction = self.presenter.borrow_mut().apply(message);

        match reaction {
            Reaction::Refresh => self.sync_main(),
            Reaction::Ignored => {}
            Reaction::BeginSelection(purpose) => self.begin_selection(purpose),
            Reaction::Notice {
                level,
                title,
                message,
            } => self.show_notice(level, &title, &message),
            Reaction::Exit => self.finish_close(),
        }
    }

    /// Copy presenter state into the main window
    fn sync_main(&self) {
        let presenter = self.presenter.borrow();
        let original = presenter.original();
        let translation = presenter.translation();

        self.main.set_original_text(original.text.as_str().into());
        self.main.set_original_font_size(original.font_size as i32);
        self.main.set_translation_text(translation.text.as_str().into());
        self.main.set_translation_font_size(translation.font_size as i32);
        self.main.set_saved_label(presenter.saved_label().into());
        self.main.set_has_saved(presenter.saved().is_some());
        self.main.set_watching(presenter.active_session().is_some());
        self.main.set_status(presenter.status().into());

        // layout has to catch up with the new text first
        let weak = self.main.as_weak();
        let to_end = translation.scroll_to_end;
        slint::Timer::single_shot(Duration::from_millis(10), move || {
            if let Some(main) = weak.upgrade() {
                if to_end {
                    main.invoke_scroll_translation_to_end();
                } else {
                    main.invoke_scroll_translation_to_top();
                }
            }
        });
    }

    pub fn begin_selection(&self, purpose: SelectionPurpose) {
        let prompt = match purpose {
            SelectionPurpose::SingleCapture => SINGLE_PROMPT,
            SelectionPurpose::WatchRegion => WATCH_PROMPT,
            SelectionPurpose::OverlayRegion { .. } => OVERLAY_PROMPT,
        };

        let mut selector = self.selector.borrow_mut();
        if selector.is_active() {
            tracing::debug!("[SLINT] selection already active, ignoring {purpose:?}");
            return;
        }
        selector.surface().set_prompt(prompt);
        if selector.begin(purpose) {
            self.main.set_status(prompt.into());
        }
    }

    pub fn pointer_down(&self, point: (i32, i32)) {
        self.selector.borrow_mut().pointer_down(point);
    }

    pub fn pointer_move(&self, point: (i32, i32)) {
        self.selector.borrow_mut().pointer_move(point);
    }

    pub fn pointer_up(&self, point: (i32, i32)) {
        // release the borrow before chaining into the next selection
        let completed = self.selector.borrow_mut().pointer_up(point);
        match completed {
            Some((purpose, bbox)) => self.selection_completed(purpose, bbox),
            None => self.main.set_status(self.presenter.borrow().status().into()),
        }
    }

    pub fn cancel_selection(&self) {
        self.selector.borrow_mut().cancel();
        self.main.set_status("Selection cancelled".into());
    }

    fn selection_completed(&self, purpose: SelectionPurpose, bbox: BoundingBox) {
        match purpose {
            SelectionPurpose::SingleCapture => {
                self.commands.send(AppCommand::SingleCapture(bbox));
            }
            SelectionPurpose::WatchRegion if self.overlay_enabled => {
                self.begin_selection(SelectionPurpose::OverlayRegion { watch: bbox });
            }
            SelectionPurpose::WatchRegion => {
                self.commands.send(AppCommand::StartWatch {
                    region: bbox,
                    overlay: None,
                    remember: false,
                });
            }
            SelectionPurpose::OverlayRegion { watch } => {
                self.commands.send(AppCommand::StartWatch {
                    region: watch,
                    overlay: Some(bbox),
                    remember: true,
                });
            }
        }
    }

    pub fn show_notice(&self, level: NoticeLevel, title: &str, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!("[SLINT] {title}: {message}"),
            NoticeLevel::Warning => tracing::warn!("[SLINT] {title}: {message}"),
            NoticeLevel::Error => tracing::error!("[SLINT] {title}: {message}"),
        }

        self.notice.set_heading(title.into());
        self.notice.set_message(message.into());
        self.notice.set_fatal(false);
        if let Err(e) = self.notice.show() {
            tracing::error!("cannot show notice: {e}");
        }
    }

    /// Ask the backend to stop. Windows stay up until it reports
    /// `BackendStopped` or the grace period runs out.
    pub fn request_close(&self) {
        if self.closing.replace(true) {
            return;
        }

        self.main.set_status("Stopping…".into());
        if !self.commands.send_wait(AppCommand::Shutdown) {
            self.finish_close();
            return;
        }

        slint::Timer::single_shot(CLOSE_GRACE, || {
            with_context(|ctx| {
                if !ctx.closed.get() {
                    tracing::warn!("[SLINT] backend did not confirm shutdown, closing anyway");
                    ctx.finish_close();
                }
            })
        });
    }

    pub fn finish_close(&self) {
        if self.closed.replace(true) {
            return;
        }

        self.close();
        slint::quit_event_loop().ok();
    }

    /// Close every window; the overlay goes first
    pub fn close(&self) {
        self.selector.borrow_mut().cancel();
        self.presenter.borrow_mut().shutdown();
        self.notice.hide().ok();
        self.main.hide().ok();
    }
}

pub fn hide_on_dismiss(notice: &NoticeWindow) {
    let weak: Weak<NoticeWindow> = notice.as_weak();
    notice.on_dismissed(move || {
        if let Some(notice) = weak.upgrade() {
            notice.hide().ok();
        }
    });
}
