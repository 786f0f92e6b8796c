use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub conversion: Option<ConversionConfig>,
    pub extraction: Option<ExtractionConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub directory: Option<String>,
    pub skip_existing: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Fraction of page height from the top to drop (0.0 disables).
    pub header_exclusion: Option<f32>,
    /// Fraction of page height from the bottom to drop (0.0 disables).
    pub footer_exclusion: Option<f32>,
    pub expand_ligatures: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Platform config directory path: `<config_dir>/pdftotxt/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdftotxt").join("config.toml"))
}

/// Load config by cascading CWD `.pdftotxt.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdftotxt.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    match read_config(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { .. }) => None,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config");
            None
        }
    }
}

/// Read and parse a config file, reporting why it could not be used.
pub fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        conversion: Some(ConversionConfig {
            directory: overlay
                .conversion
                .as_ref()
                .and_then(|c| c.directory.clone())
                .or_else(|| base.conversion.as_ref().and_then(|c| c.directory.clone())),
            skip_existing: overlay
                .conversion
                .as_ref()
                .and_then(|c| c.skip_existing)
                .or_else(|| base.conversion.as_ref().and_then(|c| c.skip_existing)),
        }),
        extraction: Some(ExtractionConfig {
            header_exclusion: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.header_exclusion)
                .or_else(|| base.extraction.as_ref().and_then(|e| e.header_exclusion)),
            footer_exclusion: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.footer_exclusion)
                .or_else(|| base.extraction.as_ref().and_then(|e| e.footer_exclusion)),
            expand_ligatures: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.expand_ligatures)
                .or_else(|| base.extraction.as_ref().and_then(|e| e.expand_ligatures)),
        }),
        display: Some(DisplayConfig {
            color: overlay
                .display
                .as_ref()
                .and_then(|d| d.color)
                .or_else(|| base.display.as_ref().and_then(|d| d.color)),
        }),
    }
}
