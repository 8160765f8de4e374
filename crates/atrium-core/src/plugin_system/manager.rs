use std::fmt::Debug;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::plugin_system::dependency::{DependencyError, ValidationReport};
use crate::plugin_system::enabled::EnabledSet;
use crate::plugin_system::host::HostApp;
use crate::plugin_system::loader::PluginLoader;
use crate::plugin_system::registry::PluginRegistry;
use crate::storage::ConfigStore;

/// Outcome of [`PluginManager::startup`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct StartupReport {
    /// Plugin ids in dependency order (partial when dependencies are missing)
    pub load_order: Vec<String>,
    /// Soft resolution failures that did not abort startup
    #[serde(skip)]
    pub dependency_errors: Vec<DependencyError>,
    /// Validation result of every registered plugin
    pub validation: Vec<ValidationReport>,
    /// Plugins left out of the enabled set because validation failed
    pub excluded: Vec<String>,
    /// Enabled set handed to the host
    pub enabled: EnabledSet,
    /// Number of plugins whose callback hook ran
    pub callbacks_registered: usize,
}

/// Plugin manager driven by the host at startup.
///
/// Owns the registry, the per-plugin config store and the host version the
/// plugins are checked against. The host creates one and passes it around.
pub struct PluginManager {
    registry: PluginRegistry,
    config_store: ConfigStore,
    app_version: String,
}

impl PluginManager {
    pub fn new(registry: PluginRegistry, config_store: ConfigStore, app_version: &str) -> Self {
        Self {
            registry,
            config_store,
            app_version: app_version.to_string(),
        }
    }

    /// Get reference to the plugin registry
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PluginRegistry {
        &mut self.registry
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Load and register every plugin unit under `root`
    pub fn load_plugins_from_directory(
        &mut self,
        loader: &PluginLoader,
        root: &Path,
        namespace: &str,
    ) -> usize {
        self.registry.discover_plugins(loader, root, namespace)
    }

    /// Bring the plugin set up for the host.
    ///
    /// A dependency cycle aborts with [`Error::Dependency`] before any
    /// callback runs. Missing dependencies are logged and startup goes on
    /// with the partial order. Plugins failing validation are dropped from
    /// the enabled set unless they are locked. The first callback hook that
    /// fails aborts startup with its error.
    pub fn startup(
        &self,
        host: &mut dyn HostApp,
        requested: Option<&EnabledSet>,
    ) -> Result<StartupReport> {
        let resolution = self.registry.resolve();
        if let Some(cycle) = resolution
            .errors
            .iter()
            .find(|e| matches!(e, DependencyError::CyclicDependency(_)))
        {
            return Err(Error::Dependency(cycle.clone()));
        }
        for e in &resolution.errors {
            warn!("Continuing startup with partial load order: {}", e);
        }

        let validation = self.registry.validate_all(&self.app_version);
        let mut enabled = self.registry.normalize_enabled_plugins(requested);
        let mut excluded = Vec::new();
        for report in validation.iter().filter(|r| !r.is_valid()) {
            let locked = self
                .registry
                .get_plugin(&report.plugin_id)
                .is_some_and(|p| p.locked);
            if locked {
                warn!(
                    "Locked plugin '{}' failed validation and stays enabled: {}",
                    report.plugin_id,
                    report.errors.join("; ")
                );
                continue;
            }
            if enabled.remove(&report.plugin_id) {
                warn!(
                    "Disabling plugin '{}': {}",
                    report.plugin_id,
                    report.errors.join("; ")
                );
                excluded.push(report.plugin_id.clone());
            }
        }

        let callbacks_registered = self.registry.register_callbacks(host, &enabled)?;
        info!(
            "Startup complete: {} plugin(s) enabled, {} callback hook(s) on '{}'",
            enabled.len(),
            callbacks_registered,
            host.name()
        );

        Ok(StartupReport {
            load_order: resolution.ids(),
            dependency_errors: resolution.errors,
            validation,
            excluded,
            enabled,
            callbacks_registered,
        })
    }
}

impl Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("plugins", &self.registry.len())
            .field("app_version", &self.app_version)
            .finish_non_exhaustive()
    }
}
