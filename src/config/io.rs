use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Config read at startup. `writable` is false when the file exists but could
/// not be read or parsed; saving then would replace the user's settings with
/// defaults.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub writable: bool,
}

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> LoadedConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return LoadedConfig {
                config: AppConfig::default(),
                writable: err.kind() == ErrorKind::NotFound,
            };
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            debug!("Parsed configuration from disk");
            LoadedConfig {
                config,
                writable: true,
            }
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Invalid config TOML, settings will not be saved: {err:#}"
            );
            LoadedConfig {
                config: AppConfig::default(),
                writable: false,
            }
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Parsing config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config)).context("Serializing config TOML")
}

/// Write the config back to disk, replacing the file atomically.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    let contents = serialize_config(config)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config directory {}", dir.display()))?;

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .context("Failed to write config temp file")?;
    temp.flush().context("Failed to flush config temp file")?;
    temp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    debug!(path = %path.display(), "Saved config");
    Ok(())
}
