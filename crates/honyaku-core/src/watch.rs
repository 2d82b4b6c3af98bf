//! Continuous watch of one screen region.
//!
//! Each session runs one worker task: capture and recognize on a blocking
//! thread, skip repeats and implausible readings, translate, then wait for
//! the next interval. The controller itself is owned by the backend event
//! loop and is the only place sessions are started or stopped.

use std::sync::Arc;
use std::time::Duration;

use honyaku_config::Config;
use honyaku_translator::Translator;
use honyaku_types::{BoundingBox, SessionId, SourceScript, UiMessage};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::engine::{CaptureSource, OcrEngine};
use crate::error::WatchError;
use crate::history::HistoryBuffer;
use crate::language::is_plausible;
use crate::sink::UiSink;

pub const OVERLAY_PLACEHOLDER: &str = "Waiting for text…";

#[derive(Clone)]
pub struct WatchServices {
    pub capture: Arc<dyn CaptureSource>,
    pub ocr: Arc<dyn OcrEngine>,
    pub translator: Arc<dyn Translator>,
}

#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub interval: Duration,
    pub ocr_language: String,
    pub from_lang: String,
    pub to_lang: String,
    pub script: SourceScript,
    pub threshold: f32,
    pub history_window: Duration,
}

impl WatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.watch.interval(),
            ocr_language: config.ocr.language.clone(),
            from_lang: config.translator.from_lang.clone(),
            to_lang: config.translator.to_lang.clone(),
            script: config.watch.source_script,
            threshold: config.watch.language_threshold,
            history_window: config.watch.history_window(),
        }
    }
}

struct Session {
    id: SessionId,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct WatchController {
    services: WatchServices,
    settings: WatchSettings,
    sink: Arc<dyn UiSink>,
    shutdown: CancellationToken,
    last_session: SessionId,
    session: Option<Session>,
}

impl WatchController {
    pub fn new(
        services: WatchServices,
        settings: WatchSettings,
        sink: Arc<dyn UiSink>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            services,
            settings,
            sink,
            shutdown,
            last_session: 0,
            session: None,
        }
    }

    /// Start watching `region`, replacing any running session
    pub fn start(&mut self, region: BoundingBox, overlay: Option<BoundingBox>) -> SessionId {
        self.stop();

        self.last_session += 1;
        let id = self.last_session;
        let token = self.shutdown.child_token();

        self.sink.post(UiMessage::WatchStarted {
            session: id,
            region,
            overlay,
        });
        self.sink.post(UiMessage::OriginalText {
            session: Some(id),
            text: String::new(),
        });
        self.sink.post(UiMessage::Translation {
            session: Some(id),
            text: String::new(),
            scroll_to_end: false,
        });
        if let Some(overlay) = overlay {
            self.sink.post(UiMessage::OverlayOpen {
                session: id,
                region: overlay,
            });
            self.sink.post(UiMessage::OverlayText {
                session: id,
                text: OVERLAY_PLACEHOLDER.to_string(),
            });
        }

        let worker = Worker {
            session: id,
            region,
            overlay: overlay.is_some(),
            services: self.services.clone(),
            settings: self.settings.clone(),
            sink: self.sink.clone(),
            token: token.clone(),
            history: HistoryBuffer::new(self.settings.history_window),
            last_seen: None,
        };
        let handle = tokio::spawn(worker.run());

        tracing::info!(session = id, "watch started on {region}");
        self.session = Some(Session { id, token, handle });
        id
    }

    /// Signal the worker to stop. It finishes its current step on its own.
    pub fn stop(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.retire(&session);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn stop_signal(&self) -> Option<CancellationToken> {
        self.session.as_ref().map(|s| s.token.clone())
    }

    /// Stop the session and wait for its worker to exit
    pub async fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            self.retire(&session);
            if let Err(e) = session.handle.await {
                tracing::error!("watch worker panicked: {e}");
            }
        }
    }

    fn retire(&self, session: &Session) {
        session.token.cancel();
        self.sink.post(UiMessage::WatchStopped {
            session: session.id,
        });
        tracing::info!(session = session.id, "watch stopped");
    }
}

/// Capture `region` and recognize it off the async threads
pub(crate) async fn recognize_region(
    services: &WatchServices,
    language: &str,
    region: BoundingBox,
) -> Result<String, WatchError> {
    let capture = services.capture.clone();
    let ocr = services.ocr.clone();
    let language = language.to_string();

    let text = tokio::task::spawn_blocking(move || -> Result<String, WatchError> {
        let frame = capture.grab(region)?;
        Ok(ocr.recognize(&frame, &language)?)
    })
    .await??;

    Ok(text.trim().to_string())
}

#[derive(Debug, PartialEq, Eq)]
enum Tick {
    Translated,
    Empty,
    Unchanged,
    Implausible,
    Cancelled,
}

struct Worker {
    session: SessionId,
    region: BoundingBox,
    overlay: bool,
    services: WatchServices,
    settings: WatchSettings,
    sink: Arc<dyn UiSink>,
    token: CancellationToken,
    history: HistoryBuffer,
    last_seen: Option<String>,
}

impl Worker {
    async fn run(mut self) {
        tracing::debug!(session = self.session, "watch worker running");

        while !self.token.is_cancelled() {
            match self.tick().await {
                Ok(Tick::Cancelled) => break,
                Ok(outcome) => tracing::debug!(session = self.session, "tick: {outcome:?}"),
                Err(e) => tracing::warn!(session = self.session, "watch tick failed: {e}"),
            }

            tokio::select! {
                _ = self.token.cancelled() => break,
                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        tracing::debug!(session = self.session, "watch worker exited");
    }

    async fn tick(&mut self) -> Result<Tick, WatchError> {
        let text =
            recognize_region(&self.services, &self.settings.ocr_language, self.region).await?;

        if self.token.is_cancelled() {
            return Ok(Tick::Cancelled);
        }
        if text.is_empty() {
            return Ok(Tick::Empty);
        }
        if self.last_seen.as_deref() == Some(text.as_str()) {
            return Ok(Tick::Unchanged);
        }
        if !is_plausible(&text, self.settings.script, self.settings.threshold) {
            return Ok(Tick::Implausible);
        }

        self.sink.post(UiMessage::OriginalText {
            session: Some(self.session),
            text: text.clone(),
        });

        let translation = tokio::select! {
            _ = self.token.cancelled() => return Ok(Tick::Cancelled),
            result = self.services.translator.translate(
                &text,
                self.settings.from_lang.clone(),
                self.settings.to_lang.clone(),
            ) => result?,
        };

        let now = tokio::time::Instant::now().into_std();
        self.history.append_at(&translation.text, now);

        if self.overlay {
            self.sink.post(UiMessage::OverlayText {
                session: self.session,
                text: translation.text.trim().to_string(),
            });
        }
        self.sink.post(UiMessage::Translation {
            session: Some(self.session),
            text: self.history.text().to_string(),
            scroll_to_end: true,
        });

        self.last_seen = Some(text);
        Ok(Tick::Translated)
    }
}
