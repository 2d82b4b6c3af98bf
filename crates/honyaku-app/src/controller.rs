use honyaku_ocr::HotkeyMap;
use honyaku_types::{AppCommand, UiMessage};
use kanal::{AsyncReceiver, AsyncSender, Receiver, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{Backend, event_loop};
use crate::io::hotkey_listener;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (Sender<UiMessage>, Receiver<UiMessage>),
    pub ui_to_app: (AsyncSender<AppCommand>, AsyncReceiver<AppCommand>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            // unbounded: session control messages must never be dropped
            app_to_ui: kanal::unbounded(),
            ui_to_app: kanal::bounded_async(64), // UI interactions
        }
    }

    /// UI-side handles: messages in, commands out
    pub fn ui_handles(&self) -> (Receiver<UiMessage>, Sender<AppCommand>) {
        (self.app_to_ui.1.clone(), self.ui_to_app.0.clone_sync())
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(channels: ChannelSet, cancel_token: CancellationToken) -> Self {
        Self {
            channels,
            cancel_token,
        }
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// Must be called inside the runtime
    pub fn spawn_tasks(&self, backend: Backend, hotkeys: HotkeyMap) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            backend,
            self.channels.ui_to_app.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Hotkeys
        tasks.spawn(hotkey_listener(
            hotkeys,
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
