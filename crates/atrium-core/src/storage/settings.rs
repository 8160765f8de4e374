use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::plugin_system::loader::DEFAULT_NAMESPACE;
use crate::storage::config::default_config_dir;
use crate::storage::error::{StorageResult, StorageSystemError};

/// Host version assumed when the settings do not name one
pub const DEFAULT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Settings of the Atrium host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Directory scanned for plugin units
    pub plugins_dir: PathBuf,
    /// Namespace plugin units are qualified with
    pub namespace: String,
    /// Directory of per-plugin config files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<PathBuf>,
    /// Host version plugins are checked against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    /// Enabled selection; the plugins' defaults apply when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_plugins: Option<Vec<String>>,
    /// Skip plugin units that lack any required module
    pub require_structure: bool,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            plugins_dir: PathBuf::from("plugins"),
            namespace: DEFAULT_NAMESPACE.to_string(),
            config_dir: None,
            app_version: None,
            enabled_plugins: None,
            require_structure: true,
        }
    }
}

impl HostSettings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> StorageResult<Self> {
        if !path.exists() {
            debug!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            StorageSystemError::UnsupportedConfigFormat(path.display().to_string())
        })?;
        let data = std::fs::read_to_string(path)
            .map_err(|e| StorageSystemError::io(e, "read_settings", path.to_path_buf()))?;
        let settings = Self::parse(&data, format)?;
        info!("Loaded host settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings text in the given format
    pub fn parse(data: &str, format: ConfigFormat) -> StorageResult<Self> {
        match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| StorageSystemError::deserialization(format.extension(), e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| StorageSystemError::deserialization(format.extension(), e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| StorageSystemError::deserialization(format.extension(), e)),
        }
    }

    /// Serialize settings in the given format
    pub fn serialize(&self, format: ConfigFormat) -> StorageResult<String> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| StorageSystemError::serialization(format.extension(), e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| StorageSystemError::serialization(format.extension(), e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| StorageSystemError::serialization(format.extension(), e)),
        }
    }

    /// Config directory, falling back to the per-user default
    pub fn resolved_config_dir(&self) -> PathBuf {
        self.config_dir.clone().unwrap_or_else(default_config_dir)
    }

    /// Host version, falling back to the crate version
    pub fn resolved_app_version(&self) -> &str {
        self.app_version.as_deref().unwrap_or(DEFAULT_APP_VERSION)
    }
}
