use std::sync::Arc;

use honyaku_types::{BoundingBox, NoticeLevel, UiMessage};

use super::fakes::{Engines, FakeOcr, FakeTranslator, drain, settings};
use crate::oneshot::capture_once;

fn region() -> BoundingBox {
    BoundingBox::new(10, 10, 310, 110).unwrap()
}

#[tokio::test]
async fn test_single_capture_translates() {
    let engines = Engines::new(
        FakeOcr::constant("  Hello world\n"),
        FakeTranslator::new(&[("Hello world", "สวัสดีโลก")]),
    );
    let (tx, rx) = kanal::unbounded::<UiMessage>();

    capture_once(&engines.services(), &settings(), Arc::new(tx), region())
        .await
        .unwrap();

    let messages = drain(&rx);
    assert!(messages.contains(&UiMessage::OriginalText {
        session: None,
        text: "Hello world".into(),
    }));
    assert!(messages.contains(&UiMessage::Translation {
        session: None,
        text: "สวัสดีโลก".into(),
        scroll_to_end: false,
    }));
}

#[tokio::test]
async fn test_empty_capture_reports_no_text() {
    let engines = Engines::new(FakeOcr::constant("   "), FakeTranslator::new(&[]));
    let (tx, rx) = kanal::unbounded::<UiMessage>();

    capture_once(&engines.services(), &settings(), Arc::new(tx), region())
        .await
        .unwrap();

    let messages = drain(&rx);
    assert!(messages.contains(&UiMessage::OriginalText {
        session: None,
        text: String::new(),
    }));
    assert_eq!(
        messages.last(),
        Some(&UiMessage::Status("No text detected".into()))
    );
    assert_eq!(engines.translator.calls(), 0);
}

#[tokio::test]
async fn test_failure_becomes_error_notice() {
    let engines = Engines::new(
        FakeOcr::constant("Hello world"),
        FakeTranslator::new(&[]).failing_first(1),
    );
    let (tx, rx) = kanal::unbounded::<UiMessage>();

    let result = capture_once(&engines.services(), &settings(), Arc::new(tx), region()).await;
    assert!(result.is_err());

    let messages = drain(&rx);
    assert!(messages.iter().any(|m| matches!(
        m,
        UiMessage::Notice { level: NoticeLevel::Error, .. }
    )));
    assert!(!messages.iter().any(|m| matches!(m, UiMessage::Translation { .. })));
}
