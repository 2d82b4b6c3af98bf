use anyhow::{Context, Result};
use honyaku_core::{Frame, OcrEngine, OcrError};
use windows::{
    Globalization::Language,
    Graphics::Imaging::{BitmapDecoder, SoftwareBitmap},
    Media::Ocr::OcrEngine as WinOcrEngine,
    Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
    core::HSTRING,
};

use crate::com::ComGuard;
use crate::png::encode_png;

/// Windows.Media.Ocr; `language` is a BCP-47 tag such as `en` or `ja`
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsOcr;

impl WindowsOcr {
    pub fn new() -> Self {
        Self
    }
}

fn engine_for(language_code: &str) -> Result<WinOcrEngine> {
    let language = Language::CreateLanguage(&HSTRING::from(language_code))
        .context("Failed to create language")?;

    WinOcrEngine::TryCreateFromLanguage(&language)
        .with_context(|| format!("No OCR engine for language '{language_code}'"))
}

fn decode_png(png: &[u8]) -> Result<SoftwareBitmap> {
    let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
    let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;

    writer.WriteBytes(png).context("Failed to write image bytes")?;
    writer
        .StoreAsync()
        .context("Failed to store async")?
        .get()
        .context("Failed to store data")?;
    writer.FlushAsync().context("Failed to flush")?.get()?;

    stream.Seek(0).context("Failed to seek")?;

    let decoder = BitmapDecoder::CreateAsync(&stream)
        .context("Failed to create decoder async")?
        .get()
        .context("Failed to get decoder")?;

    decoder
        .GetSoftwareBitmapAsync()
        .context("Failed to get bitmap async")?
        .get()
        .context("Failed to get software bitmap")
}

fn recognize_png(png: &[u8], language: &str) -> Result<String> {
    let _com = ComGuard::initialize()?;
    let engine = engine_for(language)?;
    let bitmap = decode_png(png)?;

    let result = engine
        .RecognizeAsync(&bitmap)
        .context("Failed to recognize async")?
        .get()
        .context("Failed to get OCR result")?;

    Ok(result.Text().context("Failed to get text")?.to_string())
}

impl OcrEngine for WindowsOcr {
    fn probe(&self) -> Result<String, OcrError> {
        let probe = || -> Result<String> {
            let _com = ComGuard::initialize()?;
            let engine = WinOcrEngine::TryCreateFromUserProfileLanguages()
                .context("No OCR language installed")?;
            let tag = engine
                .RecognizerLanguage()
                .context("Failed to get recognizer language")?
                .LanguageTag()
                .context("Failed to get language tag")?;
            Ok(format!("Windows OCR ({tag})"))
        };
        probe().map_err(|e| OcrError::Unavailable(format!("{e:#}")))
    }

    fn recognize(&self, frame: &Frame, language: &str) -> Result<String, OcrError> {
        let png = encode_png(frame)?;
        recognize_png(&png, language).map_err(|e| OcrError::Recognition(format!("{e:#}")))
    }
}
