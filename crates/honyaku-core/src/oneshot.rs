use std::sync::Arc;

use honyaku_types::{BoundingBox, NoticeLevel, UiMessage};

use crate::error::WatchError;
use crate::sink::UiSink;
use crate::watch::{WatchServices, WatchSettings, recognize_region};

/// Capture, recognize and translate `region` once.
///
/// Failures are reported to the UI as an error notice; the caller only
/// gets them for logging.
pub async fn capture_once(
    services: &WatchServices,
    settings: &WatchSettings,
    sink: Arc<dyn UiSink>,
    region: BoundingBox,
) -> Result<(), WatchError> {
    tracing::info!("single capture of {region}");
    sink.post(UiMessage::Status("Capturing…".to_string()));

    let result = translate_region(services, settings, sink.as_ref(), region).await;
    if let Err(e) = &result {
        tracing::error!("single capture failed: {e}");
        sink.post(UiMessage::Status("Capture failed".to_string()));
        sink.post(UiMessage::Notice {
            level: NoticeLevel::Error,
            title: "Capture failed".to_string(),
            message: e.to_string(),
        });
    }
    result
}

async fn translate_region(
    services: &WatchServices,
    settings: &WatchSettings,
    sink: &dyn UiSink,
    region: BoundingBox,
) -> Result<(), WatchError> {
    let text = recognize_region(services, &settings.ocr_language, region).await?;

    sink.post(UiMessage::OriginalText {
        session: None,
        text: text.clone(),
    });

    if text.is_empty() {
        sink.post(UiMessage::Status("No text detected".to_string()));
        return Ok(());
    }

    let translation = services
        .translator
        .translate(&text, settings.from_lang.clone(), settings.to_lang.clone())
        .await?;

    sink.post(UiMessage::Translation {
        session: None,
        text: translation.text,
        scroll_to_end: false,
    });
    sink.post(UiMessage::Status("Ready".to_string()));
    Ok(())
}
