//! Failures that have to reach the setup error window

use std::fs;

use honyaku_config::translator::{TranslatorConfig, TranslatorProvider};

use crate::{Args, build_translator, prepare};

#[test]
fn test_unreadable_config_fails_setup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ nope").unwrap();

    let args = Args {
        config: Some(path),
        positions: Some(dir.path().join("watch_positions.json")),
        log_json: false,
    };

    let err = match prepare(args) {
        Ok(_) => panic!("invalid config was accepted"),
        Err(e) => format!("{e:#}"),
    };
    assert!(err.contains("Invalid config file"), "{err}");
}

#[test]
fn test_deepl_without_key_fails_setup() {
    let config = TranslatorConfig {
        provider: TranslatorProvider::DeepL,
        ..Default::default()
    };

    let err = match build_translator(&config) {
        Ok(_) => panic!("DeepL accepted an empty key"),
        Err(e) => e.to_string(),
    };
    assert!(err.contains("api_key"), "{err}");
}

#[test]
fn test_default_translator_builds() {
    let translator = build_translator(&TranslatorConfig::default()).unwrap();
    assert!(!translator.metadata().requires_api_key);
}
