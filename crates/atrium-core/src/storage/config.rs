use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::{Map, Value};

use crate::plugin_system::model::Plugin;
use crate::storage::error::{StorageResult, StorageSystemError};
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

/// A plugin's configuration document
pub type ConfigDocument = Map<String, Value>;

/// Extension of per-plugin config files
pub const CONFIG_EXTENSION: &str = "json";

/// Default config directory: `<home>/.atrium/plugins`, or
/// `./.atrium/plugins` when no home directory is known.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".atrium")
        .join("plugins")
}

/// JSON type name of a config value
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Per-plugin configuration store.
///
/// Each plugin's document lives in `<config_dir>/<plugin_id>.json`. Reads are
/// cached for the lifetime of the store. IO and parse failures never reach the
/// caller: they are logged and reported through the return value.
pub struct ConfigStore {
    provider: Arc<dyn StorageProvider>,
    config_dir: PathBuf,
    cache: RefCell<HashMap<String, ConfigDocument>>,
}

impl ConfigStore {
    /// Create a store over the local filesystem
    pub fn new(config_dir: PathBuf) -> Self {
        Self::with_provider(Arc::new(LocalStorageProvider::new(PathBuf::new())), config_dir)
    }

    pub fn with_provider(provider: Arc<dyn StorageProvider>, config_dir: PathBuf) -> Self {
        Self {
            provider,
            config_dir,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Path of the config file for `plugin_id`
    pub fn config_path(&self, plugin_id: &str) -> StorageResult<PathBuf> {
        let invalid = plugin_id.is_empty()
            || plugin_id == "."
            || plugin_id == ".."
            || plugin_id.contains(['/', '\\']);
        if invalid {
            return Err(StorageSystemError::InvalidPath {
                path: PathBuf::from(plugin_id),
                reason: "plugin id cannot be used as a file name".to_string(),
            });
        }
        Ok(self
            .config_dir
            .join(format!("{}.{}", plugin_id, CONFIG_EXTENSION)))
    }

    /// Load a plugin's config, or an empty document if there is none or it
    /// cannot be read.
    pub fn load_config(&self, plugin_id: &str) -> ConfigDocument {
        if let Some(config) = self.cache.borrow().get(plugin_id) {
            debug!("Using cached config for plugin '{}'", plugin_id);
            return config.clone();
        }

        let config = match self.read_document(plugin_id) {
            Ok(Some(config)) => {
                info!("Loaded config for plugin '{}'", plugin_id);
                config
            }
            Ok(None) => ConfigDocument::new(),
            Err(e) => {
                error!("Error loading config for plugin '{}': {}", plugin_id, e);
                ConfigDocument::new()
            }
        };

        self.cache
            .borrow_mut()
            .insert(plugin_id.to_string(), config.clone());
        config
    }

    fn read_document(&self, plugin_id: &str) -> StorageResult<Option<ConfigDocument>> {
        let path = self.config_path(plugin_id)?;
        if !self.provider.is_file(&path) {
            return Ok(None);
        }
        let data = self.provider.read_to_string(&path)?;
        let config = serde_json::from_str::<ConfigDocument>(&data)
            .map_err(|e| StorageSystemError::deserialization("json", e))?;
        Ok(Some(config))
    }

    /// Write a plugin's config, creating the config directory if needed.
    /// Returns `false` if the document could not be written.
    pub fn save_config(&self, plugin_id: &str, config: &ConfigDocument) -> bool {
        match self.write_document(plugin_id, config) {
            Ok(()) => {
                self.cache
                    .borrow_mut()
                    .insert(plugin_id.to_string(), config.clone());
                info!("Saved config for plugin '{}'", plugin_id);
                true
            }
            Err(e) => {
                error!("Error saving config for plugin '{}': {}", plugin_id, e);
                false
            }
        }
    }

    fn write_document(&self, plugin_id: &str, config: &ConfigDocument) -> StorageResult<()> {
        let path = self.config_path(plugin_id)?;
        if !self.provider.is_dir(&self.config_dir) {
            self.provider.create_dir_all(&self.config_dir)?;
        }
        let data = serde_json::to_string_pretty(config)
            .map_err(|e| StorageSystemError::serialization("json", e))?;
        self.provider.write_string(&path, &data)
    }

    /// Shallow-merge `updates` into the stored config and save it.
    /// Top-level keys are replaced, nested objects are not merged.
    pub fn update_config(&self, plugin_id: &str, updates: &ConfigDocument) -> bool {
        let mut config = self.load_config(plugin_id);
        for (key, value) in updates {
            config.insert(key.clone(), value.clone());
        }
        self.save_config(plugin_id, &config)
    }

    /// Get a single setting
    pub fn get_setting(&self, plugin_id: &str, key: &str) -> Option<Value> {
        self.load_config(plugin_id).get(key).cloned()
    }

    /// Set a single setting
    pub fn set_setting(&self, plugin_id: &str, key: &str, value: Value) -> bool {
        let mut updates = ConfigDocument::new();
        updates.insert(key.to_string(), value);
        self.update_config(plugin_id, &updates)
    }

    /// Check `config` against the plugin's schema, collecting every problem.
    ///
    /// A plugin without a schema accepts any document. Type checks use JSON
    /// type names; `integer` and `number` are distinct.
    pub fn validate_config(&self, plugin: &Plugin, config: &ConfigDocument) -> (bool, Vec<String>) {
        let Some(schema) = &plugin.config_schema else {
            return (true, Vec::new());
        };

        let mut errors = Vec::new();

        for field in &schema.required {
            if !config.contains_key(field) {
                errors.push(format!("Missing required field: {}", field));
            }
        }

        for (field, value) in config {
            let expected = schema
                .properties
                .get(field)
                .and_then(|property| property.type_name.as_deref());
            if let Some(expected) = expected {
                let actual = json_type_name(value);
                if actual != expected {
                    errors.push(format!(
                        "Field '{}' has type {}, expected {}",
                        field, actual, expected
                    ));
                }
            }
        }

        (errors.is_empty(), errors)
    }

    /// Remove a plugin's config file and cache entry. Deleting a config that
    /// does not exist succeeds.
    pub fn delete_config(&self, plugin_id: &str) -> bool {
        let result = self.config_path(plugin_id).and_then(|path| {
            match self.provider.remove_file(&path) {
                Err(StorageSystemError::FileNotFound(_)) => Ok(()),
                other => other,
            }
        });

        match result {
            Ok(()) => {
                self.cache.borrow_mut().remove(plugin_id);
                info!("Deleted config for plugin '{}'", plugin_id);
                true
            }
            Err(e) => {
                error!("Error deleting config for plugin '{}': {}", plugin_id, e);
                false
            }
        }
    }

    /// Ids of plugins that have a config file, sorted
    pub fn list_configs(&self) -> Vec<String> {
        if !self.provider.is_dir(&self.config_dir) {
            return Vec::new();
        }
        let entries = match self.provider.read_dir(&self.config_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list configs in {}: {}", self.config_dir.display(), e);
                return Vec::new();
            }
        };

        let mut ids: Vec<String> = entries
            .iter()
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(CONFIG_EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()))
            .map(str::to_string)
            .collect();
        ids.sort();
        ids
    }

    /// Drop every cached document
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("provider", &self.provider.name())
            .field("config_dir", &self.config_dir)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}
