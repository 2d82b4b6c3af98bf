use std::sync::Arc;

use honyaku_core::{PositionStore, UiSink, WatchController, WatchServices, WatchSettings};
use honyaku_types::{AppCommand, HotkeyAction, PositionRecord, SelectionPurpose, UiMessage};
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

pub mod single_capture;
pub mod watch_workflow;

use single_capture::handle_single_capture;
use watch_workflow::{begin_watch_workflow, start_from_saved, start_watch};

/// Everything the backend task owns. Only this task starts or stops
/// watch sessions.
pub struct Backend {
    pub watch: WatchController,
    pub positions: PositionStore,
    pub saved: Option<PositionRecord>,
    pub services: WatchServices,
    pub settings: WatchSettings,
    pub sink: Arc<dyn UiSink>,
    pub overlay_enabled: bool,
}

impl Backend {
    pub fn new(
        services: WatchServices,
        settings: WatchSettings,
        positions: PositionStore,
        sink: Arc<dyn UiSink>,
        overlay_enabled: bool,
        shutdown: CancellationToken,
    ) -> Self {
        let watch = WatchController::new(
            services.clone(),
            settings.clone(),
            sink.clone(),
            shutdown,
        );

        Self {
            watch,
            saved: positions.load(),
            positions,
            services,
            settings,
            sink,
            overlay_enabled,
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// App's main loop
pub async fn event_loop(
    mut backend: Backend,
    ui_to_app_rx: AsyncReceiver<AppCommand>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    backend.sink.post(UiMessage::SavedPositions(backend.saved));
    backend.sink.post(UiMessage::BackendReady);

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for commands");
    loop {
        let command = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            command = ui_to_app_rx.recv() => command,
        };

        let command = match command {
            Ok(command) => command,
            Err(e) => {
                tracing::info!("[EVENT_LOOP] Command channel closed: {e}");
                break;
            }
        };

        tracing::debug!("[EVENT_LOOP] {command:?}");
        if let Flow::Exit = handle_command(&mut backend, command) {
            break;
        }
    }

    backend.watch.shutdown().await;
    backend.sink.post(UiMessage::BackendStopped);
    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

fn handle_command(backend: &mut Backend, command: AppCommand) -> Flow {
    match command {
        AppCommand::Hotkey(HotkeyAction::SingleCapture) => {
            backend
                .sink
                .post(UiMessage::BeginSelection(SelectionPurpose::SingleCapture));
        }
        AppCommand::Hotkey(HotkeyAction::StartWatch) | AppCommand::BeginWatchWorkflow => {
            begin_watch_workflow(backend);
        }
        AppCommand::Hotkey(HotkeyAction::StopWatch) | AppCommand::StopWatch => {
            if !backend.watch.stop() {
                backend
                    .sink
                    .post(UiMessage::Status("No watch is running".to_string()));
            }
        }
        AppCommand::SingleCapture(region) => {
            handle_single_capture(backend, region);
        }
        AppCommand::StartWatch {
            region,
            overlay,
            remember,
        } => {
            start_watch(backend, region, overlay, remember);
        }
        AppCommand::StartFromSaved => {
            start_from_saved(backend);
        }
        AppCommand::Shutdown => {
            tracing::info!("[EVENT_LOOP] Shutdown requested");
            return Flow::Exit;
        }
    }

    Flow::Continue
}
