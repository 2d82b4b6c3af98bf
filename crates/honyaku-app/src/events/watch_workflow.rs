use honyaku_types::{BoundingBox, NoticeLevel, SelectionPurpose, UiMessage};

use crate::events::Backend;

/// Stop what is running, clear the panels and ask for the watched region
pub fn begin_watch_workflow(backend: &mut Backend) {
    backend.watch.stop();

    backend.sink.post(UiMessage::OriginalText {
        session: None,
        text: String::new(),
    });
    backend.sink.post(UiMessage::Translation {
        session: None,
        text: String::new(),
        scroll_to_end: false,
    });
    backend.sink.post(UiMessage::Status(
        "Drag to select the area to watch".to_string(),
    ));
    backend
        .sink
        .post(UiMessage::BeginSelection(SelectionPurpose::WatchRegion));
}

pub fn start_watch(
    backend: &mut Backend,
    region: BoundingBox,
    overlay: Option<BoundingBox>,
    remember: bool,
) {
    if remember {
        match backend.positions.save(Some(region), overlay) {
            Ok(Some(record)) => {
                backend.saved = Some(record);
                backend.sink.post(UiMessage::SavedPositions(Some(record)));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("could not save positions: {e}");
                backend.sink.post(UiMessage::Notice {
                    level: NoticeLevel::Warning,
                    title: "Positions not saved".to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    let overlay = overlay.filter(|_| backend.overlay_enabled);
    backend.watch.start(region, overlay);
}

pub fn start_from_saved(backend: &mut Backend) {
    let Some(record) = backend.saved else {
        backend.sink.post(UiMessage::Notice {
            level: NoticeLevel::Info,
            title: "No saved position".to_string(),
            message: "Use \"Select new\" to choose the area to watch first.".to_string(),
        });
        return;
    };

    tracing::info!(
        "starting from saved positions {} / {}",
        record.watch_bbox,
        record.overlay_bbox
    );
    start_watch(backend, record.watch_bbox, Some(record.overlay_bbox), false);
}
