use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use honyaku_translator::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};
use honyaku_types::{BoundingBox, SourceScript, UiMessage};

use crate::engine::{CaptureSource, Frame, OcrEngine};
use crate::error::{CaptureError, OcrError, SurfaceError};
use crate::overlay::{OverlayGeometry, OverlaySurface};
use crate::watch::{WatchServices, WatchSettings};

/// Returns an empty frame the size of the region
#[derive(Default)]
pub struct FakeCapture {
    pub grabs: Mutex<Vec<BoundingBox>>,
}

impl CaptureSource for FakeCapture {
    fn grab(&self, region: BoundingBox) -> Result<Frame, CaptureError> {
        self.grabs.lock().unwrap().push(region);
        Ok(Frame {
            width: region.width(),
            height: region.height(),
            rgba: Vec::new(),
        })
    }
}

type ReadFn = dyn Fn(usize, &Frame) -> Result<String, OcrError> + Send + Sync;

pub struct FakeOcr {
    read: Box<ReadFn>,
    calls: AtomicUsize,
}

impl FakeOcr {
    pub fn new(
        read: impl Fn(usize, &Frame) -> Result<String, OcrError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            read: Box::new(read),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn constant(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    /// One reading per call, the last one repeats
    pub fn sequence(texts: &[&str]) -> Self {
        let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        Self::new(move |call, _| Ok(texts[call.min(texts.len() - 1)].clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_, _| Err(OcrError::Recognition("engine crashed".into())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for FakeOcr {
    fn probe(&self) -> Result<String, OcrError> {
        Ok("fake".to_string())
    }

    fn recognize(&self, frame: &Frame, _language: &str) -> Result<String, OcrError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.read)(call, frame)
    }
}

/// Looks translations up in a fixed table, prefixing unknown text with `T:`
pub struct FakeTranslator {
    table: Vec<(String, String)>,
    fail_first: usize,
    calls: AtomicUsize,
}

impl FakeTranslator {
    pub fn new(table: &[(&str, &str)]) -> Self {
        Self {
            table: table
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            fail_first: 0,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_first(mut self, count: usize) -> Self {
        self.fail_first = count;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            return Err(TranslateError::RateLimitExceeded);
        }

        let translated = self
            .table
            .iter()
            .find(|(source, _)| source == text)
            .map(|(_, target)| target.clone())
            .unwrap_or_else(|| format!("T:{text}"));

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: "fake".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Fake".to_string(),
            requires_api_key: false,
        }
    }
}

#[derive(Default)]
pub struct FakeOverlay {
    pub geometry: Option<OverlayGeometry>,
    pub label: Option<(String, u32)>,
}

impl OverlaySurface for FakeOverlay {
    fn open(&mut self, geometry: OverlayGeometry) -> Result<(), SurfaceError> {
        self.geometry = Some(geometry);
        Ok(())
    }

    fn set_text(&mut self, text: &str, font_size: u32) {
        self.label = Some((text.to_string(), font_size));
    }

    fn close(&mut self) {
        self.geometry = None;
        self.label = None;
    }
}

pub struct Engines {
    pub capture: Arc<FakeCapture>,
    pub ocr: Arc<FakeOcr>,
    pub translator: Arc<FakeTranslator>,
}

impl Engines {
    pub fn new(ocr: FakeOcr, translator: FakeTranslator) -> Self {
        Self {
            capture: Arc::new(FakeCapture::default()),
            ocr: Arc::new(ocr),
            translator: Arc::new(translator),
        }
    }

    pub fn services(&self) -> WatchServices {
        WatchServices {
            capture: self.capture.clone(),
            ocr: self.ocr.clone(),
            translator: self.translator.clone(),
        }
    }
}

pub const INTERVAL: Duration = Duration::from_secs(1);

pub fn settings() -> WatchSettings {
    WatchSettings {
        interval: INTERVAL,
        ocr_language: "eng".to_string(),
        from_lang: "en".to_string(),
        to_lang: "th".to_string(),
        script: SourceScript::Latin,
        threshold: 0.3,
        history_window: Duration::from_secs(60),
    }
}

pub fn drain(rx: &kanal::Receiver<UiMessage>) -> Vec<UiMessage> {
    let mut messages = Vec::new();
    while let Ok(Some(message)) = rx.try_recv() {
        messages.push(message);
    }
    messages
}

/// Non-empty translation panel contents, in order
pub fn translations(messages: &[UiMessage]) -> Vec<&str> {
    messages
        .iter()
        .filter_map(|m| match m {
            UiMessage::Translation { text, .. } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

pub fn originals(messages: &[UiMessage]) -> Vec<&str> {
    messages
        .iter()
        .filter_map(|m| match m {
            UiMessage::OriginalText { text, .. } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
