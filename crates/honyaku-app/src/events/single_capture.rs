use honyaku_core::oneshot::capture_once;
use honyaku_types::BoundingBox;

use crate::events::Backend;

/// Runs next to the watch session; the event loop does not wait for it
pub fn handle_single_capture(backend: &Backend, region: BoundingBox) {
    let services = backend.services.clone();
    let settings = backend.settings.clone();
    let sink = backend.sink.clone();

    tokio::spawn(async move {
        if let Err(e) = capture_once(&services, &settings, sink, region).await {
            tracing::debug!(">>> [OCR] single capture ended with error: {e}");
        }
    });
}
