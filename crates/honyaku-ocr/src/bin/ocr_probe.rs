//! Check the OCR setup - run with: cargo run -p honyaku-ocr --bin ocr_probe -- 0 0 800 200

use anyhow::{Context, Result};
use clap::Parser;
use honyaku_config::ocr::{OcrBackend, OcrConfig};
use honyaku_core::CaptureSource;
use honyaku_types::BoundingBox;

#[derive(Parser, Debug)]
#[command(about = "Probe the OCR engine and optionally read one screen region")]
struct Args {
    /// Region corners: x1 y1 x2 y2
    #[arg(num_args = 4, value_names = ["X1", "Y1", "X2", "Y2"], allow_negative_numbers = true)]
    region: Vec<i32>,

    /// Use Windows.Media.Ocr instead of tesseract
    #[arg(long)]
    windows: bool,

    #[arg(long, default_value = "eng")]
    language: String,

    /// Save the captured region as PNG
    #[arg(long)]
    save: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let args = Args::parse();
    let config = OcrConfig {
        backend: if args.windows {
            OcrBackend::Windows
        } else {
            OcrBackend::Tesseract
        },
        language: args.language.clone(),
    };

    let engine = honyaku_ocr::ocr_engine(&config)?;
    let description = engine.probe().context("OCR engine is not usable")?;
    tracing::info!("engine: {description}");

    let [x1, y1, x2, y2] = match args.region.as_slice() {
        [x1, y1, x2, y2] => [*x1, *y1, *x2, *y2],
        _ => return Ok(()),
    };
    let region = BoundingBox::new(x1, y1, x2, y2)?;

    let start = std::time::Instant::now();
    let frame = honyaku_ocr::ScreenCapture::new().grab(region)?;
    tracing::info!("captured {frame:?} in {:?}", start.elapsed());

    if let Some(path) = &args.save {
        std::fs::write(path, honyaku_ocr::encode_png(&frame)?)?;
        tracing::info!("saved to {}", path.display());
    }

    let start = std::time::Instant::now();
    let text = engine.recognize(&frame, &config.language)?;
    tracing::info!("{} chars in {:?}", text.trim().chars().count(), start.elapsed());
    for line in text.lines().filter(|l| !l.trim().is_empty()).take(10) {
        tracing::info!("> {line}");
    }

    Ok(())
}
