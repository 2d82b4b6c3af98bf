use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use honyaku_config::Config;
use honyaku_core::positions::POSITIONS_FILE;

const CONFIG_FILE: &str = "config.json";

/// Per-user config directory, e.g. `%APPDATA%\honyaku\config` on Windows
pub fn config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "honyaku", "honyaku")
        .context("Could not determine the user config directory")?;
    Ok(dirs.config_dir().to_path_buf())
}

pub struct AppPaths {
    pub config: PathBuf,
    pub positions: PathBuf,
}

impl AppPaths {
    /// Command line wins over the config file, which wins over the config dir
    pub fn resolve(
        config_arg: Option<PathBuf>,
        positions_arg: Option<PathBuf>,
        config: impl FnOnce(&Path) -> Result<Config>,
    ) -> Result<(Self, Config)> {
        let config_path = match config_arg {
            Some(path) => path,
            None => config_dir()?.join(CONFIG_FILE),
        };
        let loaded = config(&config_path)?;

        let positions = match positions_arg.or_else(|| loaded.positions_file.clone()) {
            Some(path) => path,
            None => config_dir()?.join(POSITIONS_FILE),
        };

        Ok((
            Self {
                config: config_path,
                positions,
            },
            loaded,
        ))
    }
}

/// Read the JSON config if it exists, then apply `HONYAKU_*` overrides
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        config
    } else {
        tracing::info!("No config at {}, using defaults", path.display());
        Config::default()
    };

    config.apply_env();
    Ok(config)
}
