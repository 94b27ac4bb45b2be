use anyhow::Context;
use stakeboard_core::ClientConfig;
use std::path::{Path, PathBuf};

/// `<config dir>/stakeboard/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stakeboard").join("config.json"))
}

/// Loads the explicit config file, else the default one if present, else
/// falls back to testnet defaults.
pub fn load_client_config(explicit: Option<&Path>) -> anyhow::Result<ClientConfig> {
    if let Some(path) = explicit {
        return ClientConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => ClientConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        _ => {
            tracing::debug!("No config file found, using testnet defaults");
            Ok(ClientConfig::default())
        }
    }
}
