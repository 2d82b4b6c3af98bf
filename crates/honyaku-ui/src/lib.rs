use std::cell::{Cell, RefCell};
use std::rc::Rc;

use honyaku_core::{Presenter, PresenterConfig, RegionSelector};
use honyaku_types::{AppCommand, UiMessage};
use kanal::{Receiver, Sender};
use slint::ComponentHandle;

mod bridge;
mod events;
mod surfaces;

use bridge::CommandSender;
use events::{UiContext, hide_on_dismiss};
use surfaces::{SlintOverlay, SlintSelection, to_screen};

slint::include_modules!();

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("UI platform error: {0}")]
    Platform(#[from] slint::PlatformError),

    #[error("cannot start UI forwarder: {0}")]
    Forwarder(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy)]
pub struct UiSettings {
    pub presenter: PresenterConfig,
    pub overlay_enabled: bool,
    pub overlay_opacity: f32,
}

/// Run the UI on the calling thread until the main window is closed.
///
/// Closing the main window sends [`AppCommand::Shutdown`]. The windows are
/// released once the backend answers with `UiMessage::BackendStopped`, so
/// the watch session is always stopped first.
pub fn run_ui(
    settings: UiSettings,
    from_backend: Receiver<UiMessage>,
    to_backend: Sender<AppCommand>,
) -> Result<(), UiError> {
    let main = MainWindow::new()?;
    let notice = NoticeWindow::new()?;
    hide_on_dismiss(&notice);

    let selection = SelectionWindow::new()?;
    let overlay = SlintOverlay::new(OverlayWindow::new()?, settings.overlay_opacity);
    let commands = CommandSender::new(to_backend);

    let context = Rc::new(UiContext {
        main: main.clone_strong(),
        notice,
        presenter: RefCell::new(Presenter::new(settings.presenter, overlay)),
        selector: RefCell::new(RegionSelector::new(SlintSelection::new(
            selection.clone_strong(),
        ))),
        commands: commands.clone(),
        overlay_enabled: settings.overlay_enabled,
        closing: Cell::new(false),
        closed: Cell::new(false),
    });

    wire_selection(&selection, &context);
    wire_main(&main, &context, &commands);

    bridge::install(context.clone());
    let _forwarder = bridge::spawn_forwarder(from_backend)?;

    main.show()?;
    tracing::info!("[SLINT] main window shown");
    slint::run_event_loop_until_quit()?;

    if let Some(context) = bridge::uninstall() {
        context.close();
    }
    tracing::info!("[SLINT] event loop finished");
    Ok(())
}

fn wire_selection(selection: &SelectionWindow, context: &Rc<UiContext>) {
    let screen_point = |weak: &slint::Weak<SelectionWindow>, x: f32, y: f32| {
        weak.upgrade().map(|w| to_screen(w.window(), x, y))
    };

    {
        let ctx = Rc::downgrade(context);
        let weak = selection.as_weak();
        selection.on_pointer_down(move |x, y| {
            if let (Some(ctx), Some(point)) = (ctx.upgrade(), screen_point(&weak, x, y)) {
                ctx.pointer_down(point);
            }
        });
    }
    {
        let ctx = Rc::downgrade(context);
        let weak = selection.as_weak();
        selection.on_pointer_move(move |x, y| {
            if let (Some(ctx), Some(point)) = (ctx.upgrade(), screen_point(&weak, x, y)) {
                ctx.pointer_move(point);
            }
        });
    }
    {
        let ctx = Rc::downgrade(context);
        let weak = selection.as_weak();
        selection.on_pointer_up(move |x, y| {
            if let (Some(ctx), Some(point)) = (ctx.upgrade(), screen_point(&weak, x, y)) {
                ctx.pointer_up(point);
            }
        });
    }
    {
        let ctx = Rc::downgrade(context);
        selection.on_cancel(move || {
            if let Some(ctx) = ctx.upgrade() {
                ctx.cancel_selection();
            }
        });
    }
}

fn wire_main(main: &MainWindow, context: &Rc<UiContext>, commands: &CommandSender) {
    {
        let ctx = Rc::downgrade(context);
        main.on_single_capture(move || {
            if let Some(ctx) = ctx.upgrade() {
                ctx.begin_selection(honyaku_types::SelectionPurpose::SingleCapture);
            }
        });
    }
    {
        let commands = commands.clone();
        main.on_use_saved(move || commands.send(AppCommand::StartFromSaved));
    }
    {
        let commands = commands.clone();
        main.on_select_new(move || commands.send(AppCommand::BeginWatchWorkflow));
    }
    {
        let commands = commands.clone();
        main.on_stop_watch(move || commands.send(AppCommand::StopWatch));
    }
    {
        let ctx = Rc::downgrade(context);
        main.window().on_close_requested(move || {
            tracing::info!("[SLINT] main window close requested");
            match ctx.upgrade() {
                Some(ctx) => {
                    ctx.request_close();
                    slint::CloseRequestResponse::KeepWindowShown
                }
                None => {
                    slint::quit_event_loop().ok();
                    slint::CloseRequestResponse::HideWindow
                }
            }
        });
    }
}

/// Show a blocking error window; used when setup fails before the main UI
pub fn show_setup_error(title: &str, message: &str) -> Result<(), UiError> {
    let notice = NoticeWindow::new()?;
    notice.set_heading(title.into());
    notice.set_message(message.into());
    notice.set_fatal(true);

    let weak = notice.as_weak();
    notice.on_dismissed(move || {
        if let Some(notice) = weak.upgrade() {
            notice.hide().ok();
        }
        slint::quit_event_loop().ok();
    });

    notice.run()?;
    Ok(())
}
