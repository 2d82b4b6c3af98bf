use std::time::Duration;

use honyaku_ocr::HotkeyMap;
use honyaku_types::AppCommand;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Forward global hotkey presses to the backend as commands
pub async fn hotkey_listener(
    hotkeys: HotkeyMap,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppCommand>,
) -> anyhow::Result<()> {
    if hotkeys.is_empty() {
        tracing::warn!("No hotkeys registered, listener not started");
        return Ok(());
    }

    let listener = tokio::task::spawn_blocking(move || {
        let tx = event_tx.as_sync();
        while !cancel.is_cancelled() {
            if let Some(action) = hotkeys.poll() {
                tracing::info!("Hotkey pressed: {action:?}");
                if let Err(e) = tx.send(AppCommand::Hotkey(action)) {
                    tracing::info!("Backend gone, hotkey listener stopping: {e}");
                    break;
                }
                continue;
            }

            std::thread::sleep(POLL_INTERVAL);
        }
        tracing::info!("Hotkey listener stopping");
    });

    listener.await?;
    Ok(())
}
