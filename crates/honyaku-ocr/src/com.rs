use anyhow::{Context, Result};

/// Keeps COM initialized on the current thread until dropped
pub struct ComGuard;

impl ComGuard {
    pub fn initialize() -> Result<Self> {
        unsafe {
            windows::Win32::System::Com::CoInitializeEx(
                None,
                windows::Win32::System::Com::COINIT_MULTITHREADED,
            )
            .ok()
            .context("Failed to initialize COM")?;
        }
        Ok(ComGuard)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            windows::Win32::System::Com::CoUninitialize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinitialize_after_drop() {
        {
            let _guard = ComGuard::initialize().unwrap();
        }
        assert!(ComGuard::initialize().is_ok());
    }
}
