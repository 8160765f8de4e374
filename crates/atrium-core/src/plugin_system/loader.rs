use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::plugin_system::error::{PluginSystemError, PluginSystemErrorSource};
use crate::plugin_system::model::{CallbackError, Plugin};
use crate::plugin_system::structure::{has_entry_module, validate_structure};

/// Namespace bundled plugin units are registered under
pub const DEFAULT_NAMESPACE: &str = "atrium.plugins";

/// Directories whose name starts with this marker are private and skipped
pub const PRIVATE_MARKER: char = '_';

/// Constructor of a plugin descriptor
pub type PluginFactory = Arc<dyn Fn() -> Result<Plugin, CallbackError> + Send + Sync>;

/// Build the catalog key of a unit within a namespace
pub fn qualified_name(namespace: &str, unit: &str) -> String {
    format!("{}.{}", namespace, unit)
}

/// Registration table mapping qualified unit names to plugin factories.
///
/// Plugin crates are linked statically; the host fills the catalog at startup
/// and the loader resolves discovered unit directories against it.
#[derive(Clone, Default)]
pub struct PluginCatalog {
    factories: HashMap<String, PluginFactory>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallible factory under a qualified name. A later
    /// registration under the same name replaces the earlier one.
    pub fn register<F>(&mut self, qualified: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Plugin, CallbackError> + Send + Sync + 'static,
    {
        if self
            .factories
            .insert(qualified.to_string(), Arc::new(factory))
            .is_some()
        {
            debug!("Replaced plugin factory '{}'", qualified);
        }
        self
    }

    /// Register an infallible `get_plugin` style entry point
    pub fn register_fn(&mut self, qualified: &str, factory: fn() -> Plugin) -> &mut Self {
        self.register(qualified, move || Ok(factory()))
    }

    pub fn get(&self, qualified: &str) -> Option<PluginFactory> {
        self.factories.get(qualified).cloned()
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.factories.contains_key(qualified)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for PluginCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginCatalog")
            .field("factories", &self.names())
            .finish()
    }
}

/// Result of scanning a plugin root: what loaded and what did not
#[derive(Debug, Default)]
pub struct LoadReport {
    pub plugins: Vec<Plugin>,
    pub failures: Vec<PluginSystemError>,
}

/// Discovers plugin units on disk and instantiates them through the catalog
#[derive(Debug, Clone)]
pub struct PluginLoader {
    catalog: PluginCatalog,
    require_structure: bool,
}

impl PluginLoader {
    /// Create a new plugin loader backed by `catalog`
    pub fn new(catalog: PluginCatalog) -> Self {
        Self {
            catalog,
            require_structure: true,
        }
    }

    /// Toggle the structure pre-check performed before instantiation
    pub fn require_structure(mut self, require: bool) -> Self {
        self.require_structure = require;
        self
    }

    pub fn catalog(&self) -> &PluginCatalog {
        &self.catalog
    }

    /// List the immediate, non-private subdirectories of `root` that contain
    /// an entry module. Order follows directory iteration and is not sorted.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        if !root.is_dir() {
            warn!("Plugins directory not found: {}", root.display());
            return Vec::new();
        }

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read plugins directory {}: {}", root.display(), e);
                return Vec::new();
            }
        };

        let mut units = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            let private = entry
                .file_name()
                .to_str()
                .is_none_or(|name| name.starts_with(PRIVATE_MARKER));

            if path.is_dir() && !private && has_entry_module(&path) {
                debug!("Discovered plugin directory: {}", path.display());
                units.push(path);
            }
        }
        units
    }

    /// Instantiate the plugin for one unit directory.
    pub fn load_unit(&self, unit: &Path, namespace: &str) -> Result<Plugin, PluginSystemError> {
        let unit_name = unit
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PluginSystemError::LoadingError {
                unit: unit.display().to_string(),
                path: Some(unit.to_path_buf()),
                source: Box::new(PluginSystemErrorSource::Other(
                    "unit path has no usable directory name".to_string(),
                )),
            })?;

        if !unit.is_dir() {
            return Err(PluginSystemError::LoadingError {
                unit: unit_name.to_string(),
                path: Some(unit.to_path_buf()),
                source: Box::new(PluginSystemErrorSource::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "unit directory does not exist",
                ))),
            });
        }

        if self.require_structure {
            let report = validate_structure(unit);
            if !report.is_valid() {
                return Err(PluginSystemError::InvalidStructure {
                    unit: unit_name.to_string(),
                    missing: report.missing,
                });
            }
        }

        let qualified = qualified_name(namespace, unit_name);
        let factory = self
            .catalog
            .get(&qualified)
            .ok_or_else(|| PluginSystemError::FactoryNotFound(qualified.clone()))?;

        let loading_error = |source: PluginSystemErrorSource| PluginSystemError::LoadingError {
            unit: unit_name.to_string(),
            path: Some(unit.to_path_buf()),
            source: Box::new(source),
        };

        // A panicking factory must not take the other units down with it
        let plugin = match panic::catch_unwind(AssertUnwindSafe(|| factory())) {
            Ok(Ok(plugin)) => plugin,
            Ok(Err(e)) => return Err(loading_error(PluginSystemErrorSource::Factory(e))),
            Err(payload) => {
                return Err(loading_error(PluginSystemErrorSource::Panic(panic_message(
                    payload.as_ref(),
                ))));
            }
        };

        info!("Successfully loaded plugin: {} (id: {})", plugin.name, plugin.id);
        Ok(plugin)
    }

    /// Instantiate one unit, logging and discarding any failure
    pub fn load(&self, unit: &Path, namespace: &str) -> Option<Plugin> {
        match self.load_unit(unit, namespace) {
            Ok(plugin) => Some(plugin),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Discover every unit under `root` and try to load each one, keeping
    /// successes and failures apart. Discovery order is preserved.
    pub fn scan(&self, root: &Path, namespace: &str) -> LoadReport {
        info!("Discovering plugins in: {}", root.display());
        let mut report = LoadReport::default();

        for unit in self.discover(root) {
            match self.load_unit(&unit, namespace) {
                Ok(plugin) => report.plugins.push(plugin),
                Err(e) => {
                    warn!("{}", e);
                    report.failures.push(e);
                }
            }
        }

        info!("Successfully loaded {} plugin(s)", report.plugins.len());
        report
    }

    /// Discover and load all units, returning only the plugins that loaded
    pub fn discover_and_load_all(&self, root: &Path, namespace: &str) -> Vec<Plugin> {
        self.scan(root, namespace).plugins
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
