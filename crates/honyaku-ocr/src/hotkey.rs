use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::HotKey,
};
use honyaku_config::hotkeys::HotkeyConfig;
use honyaku_types::HotkeyAction;

/// Parse a hotkey string like "Ctrl+Shift+Q" or "Alt+F9"
pub fn parse_hotkey(hotkey_str: &str) -> Result<HotKey> {
    let trimmed = hotkey_str.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Empty hotkey string"));
    }

    HotKey::from_str(trimmed).map_err(|e| anyhow!("Invalid hotkey '{trimmed}': {e}"))
}

/// Hotkey ids and the action each one triggers. Cheap to clone into the
/// listener thread.
#[derive(Debug, Clone, Default)]
pub struct HotkeyMap {
    entries: Vec<(u32, HotkeyAction)>,
}

impl HotkeyMap {
    pub fn action(&self, id: u32) -> Option<HotkeyAction> {
        self.entries
            .iter()
            .find(|(hotkey_id, _)| *hotkey_id == id)
            .map(|(_, action)| *action)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Next pressed hotkey, non-blocking
    pub fn poll(&self) -> Option<HotkeyAction> {
        let receiver = GlobalHotKeyEvent::receiver();
        while let Ok(event) = receiver.try_recv() {
            if event.state != HotKeyState::Pressed {
                continue;
            }
            match self.action(event.id) {
                Some(action) => return Some(action),
                None => tracing::debug!("unknown hotkey id {}", event.id),
            }
        }
        None
    }
}

/// Registered global hotkeys. Must live on the thread that runs the
/// platform event loop; unregisters everything on drop.
pub struct HotkeyBindings {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
    map: HotkeyMap,
}

impl HotkeyBindings {
    /// Register the configured hotkeys. A hotkey that fails to parse or
    /// register is skipped with a warning.
    pub fn register(config: &HotkeyConfig) -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        let mut bindings = Self {
            manager,
            registered: Vec::new(),
            map: HotkeyMap::default(),
        };

        for (hotkey_str, action) in [
            (&config.single_capture, HotkeyAction::SingleCapture),
            (&config.start_watch, HotkeyAction::StartWatch),
            (&config.stop_watch, HotkeyAction::StopWatch),
        ] {
            if let Err(e) = bindings.bind(hotkey_str, action) {
                tracing::warn!("Hotkey for {action:?} not registered: {e:#}");
            }
        }

        Ok(bindings)
    }

    fn bind(&mut self, hotkey_str: &str, action: HotkeyAction) -> Result<()> {
        let hotkey = parse_hotkey(hotkey_str)?;
        self.manager
            .register(hotkey)
            .with_context(|| format!("Failed to register '{hotkey_str}'"))?;

        tracing::info!("Registered hotkey {hotkey_str} for {action:?}");
        self.registered.push(hotkey);
        self.map.entries.push((hotkey.id(), action));
        Ok(())
    }

    pub fn map(&self) -> HotkeyMap {
        self.map.clone()
    }
}

impl Drop for HotkeyBindings {
    fn drop(&mut self) {
        if let Err(e) = self.manager.unregister_all(&self.registered) {
            tracing::warn!("Failed to unregister hotkeys: {e}");
        }
    }
}
