use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use honyaku_config::Config;
use honyaku_config::translator::{TranslatorConfig, TranslatorProvider};
use honyaku_core::{PositionStore, PresenterConfig, UiSink, WatchServices, WatchSettings};
use honyaku_translator::{DeepLTranslator, GoogleTranslator, Translator};
use honyaku_ui::UiSettings;
use tokio_util::sync::CancellationToken;

mod controller;
mod events;
mod io;
mod logging;
mod storage;

#[cfg(test)]
mod tests;

use controller::{AppController, ChannelSet};
use events::Backend;
use storage::AppPaths;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Screen region translator with a live watch mode and overlay
#[derive(Parser, Debug)]
#[command(name = "honyaku", version)]
struct Args {
    /// Config file, defaults to config.json in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where watch/overlay regions are remembered
    #[arg(long)]
    positions: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log_json);

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env loaded: {e}");
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_translator(config: &TranslatorConfig) -> Result<Arc<dyn Translator>> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let translator: Arc<dyn Translator> = match config.provider {
        TranslatorProvider::Google => {
            Arc::new(GoogleTranslator::new(config.api_url.clone(), timeout)?)
        }
        TranslatorProvider::DeepL => {
            anyhow::ensure!(
                !config.api_key.is_empty(),
                "DeepL needs translator.api_key or HONYAKU_TRANSLATOR_API_KEY"
            );
            Arc::new(DeepLTranslator::new(
                config.api_key.clone(),
                config.api_url.clone(),
                timeout,
            )?)
        }
    };

    tracing::info!("Translator: {}", translator.metadata().name);
    Ok(translator)
}

/// Engines that must work before any window opens
fn setup(config: &Config) -> Result<WatchServices> {
    let ocr = honyaku_ocr::ocr_engine(&config.ocr)?;
    let description = ocr.probe().context("OCR engine is not available")?;
    tracing::info!("OCR engine: {description}");

    Ok(WatchServices {
        capture: Arc::new(honyaku_ocr::ScreenCapture::new()),
        ocr,
        translator: build_translator(&config.translator)?,
    })
}

/// Config and engines; any failure here is shown before the main window
fn prepare(args: Args) -> Result<(AppPaths, Config, WatchServices)> {
    let (paths, config) = AppPaths::resolve(args.config, args.positions, storage::load_config)?;
    tracing::info!("Config: {}", paths.config.display());
    tracing::info!("Positions: {}", paths.positions.display());

    let services = setup(&config)?;
    Ok((paths, config, services))
}

fn run(args: Args) -> Result<ExitCode> {
    let (paths, config, services) = match prepare(args) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!("Setup failed: {e:#}");
            honyaku_ui::show_setup_error("honyaku cannot start", &format!("{e:#}"))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let cancel = CancellationToken::new();
    let controller = AppController::new(ChannelSet::new(), cancel.clone());

    // global hotkeys are delivered through this thread's event loop
    let hotkeys = match honyaku_ocr::HotkeyBindings::register(&config.hotkeys) {
        Ok(bindings) => Some(bindings),
        Err(e) => {
            tracing::warn!("Global hotkeys unavailable: {e:#}");
            None
        }
    };
    let hotkey_map = hotkeys.as_ref().map(|h| h.map()).unwrap_or_default();

    let sink: Arc<dyn UiSink> = Arc::new(controller.channels().app_to_ui.0.clone());
    let backend = Backend::new(
        services,
        WatchSettings::from_config(&config),
        PositionStore::new(paths.positions),
        sink,
        config.overlay.enabled,
        cancel.child_token(),
    );
    let mut tasks = {
        let _guard = runtime.enter();
        controller.spawn_tasks(backend, hotkey_map)
    };

    let settings = UiSettings {
        presenter: PresenterConfig::from_config(&config),
        overlay_enabled: config.overlay.enabled,
        overlay_opacity: config.overlay.opacity,
    };
    let (from_backend, to_backend) = controller.channels().ui_handles();
    let ui_result = honyaku_ui::run_ui(settings, from_backend, to_backend);

    tracing::info!("UI closed, shutting down");
    controller.shutdown();

    let drained = runtime.block_on(async {
        tokio::time::timeout(SHUTDOWN_GRACE, async {
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
                    Err(e) => tracing::error!("task panicked: {e}"),
                }
            }
        })
        .await
    });
    if drained.is_err() {
        tracing::warn!("Backend did not stop within {SHUTDOWN_GRACE:?}");
    }

    drop(hotkeys);
    runtime.shutdown_timeout(Duration::from_secs(1));

    ui_result?;
    Ok(ExitCode::SUCCESS)
}
