//! Session-level flows against fake capture, OCR and translation engines

mod fakes;
mod single_capture_tests;
