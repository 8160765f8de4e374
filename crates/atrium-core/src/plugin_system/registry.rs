use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::plugin_system::dependency::{Resolution, ValidationReport, resolve_dependencies, validate_plugin};
use crate::plugin_system::enabled::{EnabledPluginsDocument, EnabledSet};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::host::HostApp;
use crate::plugin_system::loader::PluginLoader;
use crate::plugin_system::model::{Plugin, PluginPage};
use crate::plugin_system::navigation::{NavigationSection, build_navigation_sections};

/// Plugin metadata row for UI rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub locked: bool,
    pub default_enabled: bool,
}

/// Metadata row together with the plugin's effective enabled state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginStatus {
    #[serde(flatten)]
    pub metadata: PluginMetadata,
    pub enabled: bool,
}

/// Registry for managing plugins.
///
/// Registration is append-only: the first plugin registered under an id
/// wins and later registrations of the same id are ignored. Disabling a
/// plugin means leaving it out of an enabled set, never removing it.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Registered plugins in registration order
    plugins: Vec<Arc<Plugin>>,
    /// Plugin id -> position in `plugins`
    index: HashMap<String, usize>,
    /// Page id -> owning plugin id
    page_owners: HashMap<String, String>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `plugins`, skipping any that
    /// cannot be registered.
    pub fn with_plugins<I: IntoIterator<Item = Plugin>>(plugins: I) -> Self {
        let mut registry = Self::new();
        for plugin in plugins {
            if let Err(e) = registry.register_plugin(plugin) {
                warn!("{}", e);
            }
        }
        registry
    }

    /// Register a plugin.
    ///
    /// Returns `Ok(false)` when a plugin with the same id is already present.
    /// Fails without registering anything if one of the plugin's page ids is
    /// already provided by another plugin or repeated within the plugin.
    pub fn register_plugin(&mut self, plugin: Plugin) -> Result<bool, PluginSystemError> {
        if self.index.contains_key(&plugin.id) {
            debug!("Plugin '{}' already registered, ignoring", plugin.id);
            return Ok(false);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for page in &plugin.pages {
            if let Some(owner) = self.page_owners.get(&page.id) {
                return Err(PluginSystemError::DuplicatePage {
                    plugin_id: plugin.id.clone(),
                    page_id: page.id.clone(),
                    owner: owner.clone(),
                });
            }
            if !seen.insert(page.id.as_str()) {
                return Err(PluginSystemError::DuplicatePage {
                    plugin_id: plugin.id.clone(),
                    page_id: page.id.clone(),
                    owner: plugin.id.clone(),
                });
            }
        }

        for page in &plugin.pages {
            self.page_owners.insert(page.id.clone(), plugin.id.clone());
        }
        self.index.insert(plugin.id.clone(), self.plugins.len());
        debug!("Registered plugin '{}' ({} page(s))", plugin.id, plugin.pages.len());
        self.plugins.push(Arc::new(plugin));
        Ok(true)
    }

    /// Load every unit under `root` and register the results. A unit that
    /// fails to load or register is logged and skipped.
    pub fn discover_plugins(&mut self, loader: &PluginLoader, root: &Path, namespace: &str) -> usize {
        let mut registered = 0;
        for plugin in loader.discover_and_load_all(root, namespace) {
            match self.register_plugin(plugin) {
                Ok(true) => registered += 1,
                Ok(false) => {}
                Err(e) => warn!("{}", e),
            }
        }
        info!("Registered {} plugin(s) from {}", registered, root.display());
        registered
    }

    /// Whether any plugin has been registered
    pub fn is_populated(&self) -> bool {
        !self.plugins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Registered plugins in registration order
    pub fn get_plugins(&self) -> &[Arc<Plugin>] {
        &self.plugins
    }

    /// Check if a plugin is registered by ID
    pub fn has_plugin(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get a plugin Arc by ID
    pub fn get_plugin(&self, id: &str) -> Option<Arc<Plugin>> {
        self.index.get(id).map(|&i| Arc::clone(&self.plugins[i]))
    }

    /// Copy of the id -> plugin map
    pub fn get_plugin_registry(&self) -> HashMap<String, Arc<Plugin>> {
        self.plugins
            .iter()
            .map(|p| (p.id.clone(), Arc::clone(p)))
            .collect()
    }

    /// Metadata rows in registration order
    pub fn get_plugin_metadata(&self) -> Vec<PluginMetadata> {
        self.plugins
            .iter()
            .map(|p| PluginMetadata {
                id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
                version: p.version.clone(),
                locked: p.locked,
                default_enabled: p.default_enabled,
            })
            .collect()
    }

    /// Metadata rows with each plugin's state under the normalized `enabled` set
    pub fn get_plugin_status(&self, enabled: Option<&EnabledSet>) -> Vec<PluginStatus> {
        let enabled = self.normalize_enabled_plugins(enabled);
        self.get_plugin_metadata()
            .into_iter()
            .map(|metadata| PluginStatus {
                enabled: enabled.contains(&metadata.id),
                metadata,
            })
            .collect()
    }

    /// Whether `id` is active under the given selection; locked plugins always are
    pub fn is_plugin_enabled(&self, id: &str, enabled: &EnabledSet) -> bool {
        match self.get_plugin(id) {
            Some(plugin) => plugin.locked || enabled.contains(id),
            None => false,
        }
    }

    /// Ids of plugins enabled by default, locked plugins included
    pub fn get_default_enabled_plugins(&self) -> EnabledSet {
        self.plugins
            .iter()
            .filter(|p| p.default_enabled || p.locked)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Ids of locked plugins
    pub fn get_locked_plugins(&self) -> EnabledSet {
        self.plugins
            .iter()
            .filter(|p| p.locked)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Turn an arbitrary selection into a valid enabled set.
    ///
    /// `None` starts from the defaults. Locked plugins are always added and
    /// unknown ids dropped. An explicit empty selection stays empty apart
    /// from locked plugins.
    pub fn normalize_enabled_plugins<'s, I>(&self, requested: Option<I>) -> EnabledSet
    where
        I: IntoIterator<Item = &'s String>,
    {
        let mut enabled: EnabledSet = match requested {
            Some(ids) => ids.into_iter().cloned().collect(),
            None => self.get_default_enabled_plugins(),
        };
        enabled.extend(self.get_locked_plugins());
        enabled.retain(|id| self.has_plugin(id));
        enabled
    }

    /// Pages of enabled plugins in registration order
    pub fn get_pages(&self, enabled: &EnabledSet) -> Vec<&PluginPage> {
        self.plugins
            .iter()
            .filter(|p| enabled.contains(&p.id))
            .flat_map(|p| p.pages.iter())
            .collect()
    }

    /// Page id -> page for enabled plugins
    pub fn get_page_registry(&self, enabled: &EnabledSet) -> BTreeMap<String, &PluginPage> {
        self.get_pages(enabled)
            .into_iter()
            .map(|page| (page.id.clone(), page))
            .collect()
    }

    /// Navigation sections for the pages of enabled plugins
    pub fn build_navigation(&self, enabled: &EnabledSet) -> Vec<NavigationSection<'_>> {
        build_navigation_sections(&self.get_pages(enabled))
    }

    /// Order registered plugins by their dependencies
    pub fn resolve(&self) -> Resolution {
        resolve_dependencies(&self.plugins)
    }

    /// Validate every registered plugin against the host version and the
    /// set of registered plugins. Results are advisory.
    pub fn validate_all(&self, app_version: &str) -> Vec<ValidationReport> {
        let available = self.get_plugin_registry();
        self.plugins
            .iter()
            .map(|p| validate_plugin(p, &available, app_version))
            .collect()
    }

    /// Run the callback hook of every plugin in the normalized `enabled` set,
    /// in registration order. The first failing hook aborts the sequence and
    /// its error is returned to the caller.
    pub fn register_callbacks(
        &self,
        host: &mut dyn HostApp,
        enabled: &EnabledSet,
    ) -> Result<usize, PluginSystemError> {
        let enabled = self.normalize_enabled_plugins(Some(enabled));
        let mut invoked = 0;
        for plugin in self.plugins.iter().filter(|p| enabled.contains(&p.id)) {
            if !plugin.has_callbacks() {
                continue;
            }
            debug!("Registering callbacks for plugin '{}' on host '{}'", plugin.id, host.name());
            plugin
                .register_callbacks(host)
                .map_err(|source| PluginSystemError::CallbackRegistration {
                    plugin_id: plugin.id.clone(),
                    source,
                })?;
            invoked += 1;
        }
        Ok(invoked)
    }

    /// Export an enabled selection as an interchange document
    pub fn export_enabled_plugins(&self, enabled: Option<&EnabledSet>) -> EnabledPluginsDocument {
        EnabledPluginsDocument::new(&self.normalize_enabled_plugins(enabled))
    }

    /// Import an interchange document: unknown ids are dropped and locked
    /// plugins are always included.
    pub fn import_enabled_plugins(&self, data: &str) -> Result<EnabledSet, PluginSystemError> {
        let document = EnabledPluginsDocument::from_json(data)?;
        Ok(self.normalize_enabled_plugins(Some(&document.enabled_plugins)))
    }
}
