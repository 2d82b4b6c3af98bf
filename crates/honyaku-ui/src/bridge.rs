use std::cell::RefCell;
use std::rc::Rc;
use std::thread::JoinHandle;

use honyaku_types::{AppCommand, UiMessage};
use kanal::{Receiver, Sender};

use crate::events::UiContext;

thread_local! {
    static CONTEXT: RefCell<Option<Rc<UiContext>>> = const { RefCell::new(None) };
}

/// Make `context` reachable from closures posted to the event loop
pub(crate) fn install(context: Rc<UiContext>) {
    CONTEXT.with(|slot| *slot.borrow_mut() = Some(context));
}

pub(crate) fn uninstall() -> Option<Rc<UiContext>> {
    CONTEXT.with(|slot| slot.borrow_mut().take())
}

pub(crate) fn with_context(f: impl FnOnce(&Rc<UiContext>)) {
    let context = CONTEXT.with(|slot| slot.borrow().clone());
    match context {
        Some(context) => f(&context),
        None => tracing::debug!("UI context gone, dropping message"),
    }
}

/// Move backend messages onto the Slint event loop, in order
pub fn spawn_forwarder(from_backend: Receiver<UiMessage>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("ui-forwarder".to_string())
        .spawn(move || {
            while let Ok(message) = from_backend.recv() {
                let posted =
                    slint::invoke_from_event_loop(move || with_context(|ctx| ctx.apply(message)));
                if posted.is_err() {
                    tracing::debug!("event loop stopped, forwarder exiting");
                    break;
                }
            }
        })
}

/// Non-blocking send from the UI thread
#[derive(Clone)]
pub struct CommandSender {
    tx: Sender<AppCommand>,
}

impl CommandSender {
    pub fn new(tx: Sender<AppCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: AppCommand) {
        tracing::debug!("UI -> backend: {command:?}");
        match self.tx.try_send(command) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("backend queue full, command dropped"),
            Err(e) => tracing::warn!("backend gone: {e}"),
        }
    }

    /// Wait for room in the queue; `false` when the backend is gone
    pub fn send_wait(&self, command: AppCommand) -> bool {
        tracing::debug!("UI -> backend: {command:?}");
        match self.tx.send(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("backend gone: {e}");
                false
            }
        }
    }
}
