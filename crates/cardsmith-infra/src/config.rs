//! Studio configuration loader.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`StudioConfig`]. Missing or malformed files fall back to defaults.

use std::path::Path;

use cardsmith_types::config::StudioConfig;

use crate::filesystem::LocalFileSystem;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`StudioConfig::default()`].
/// - Unreadable or unparsable file: a warning, then the default.
pub async fn load_studio_config(data_dir: &Path) -> StudioConfig {
    let config_path = LocalFileSystem::config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return StudioConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return StudioConfig::default();
        }
    };

    match toml::from_str::<StudioConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            StudioConfig::default()
        }
    }
}
