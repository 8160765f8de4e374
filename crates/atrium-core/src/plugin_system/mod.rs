//! # Atrium Plugin System
//!
//! Infrastructure for extending the Atrium host with statically linked
//! plugin units. The plugin system covers the whole path from a directory
//! of units on disk to a set of active plugins: discovery and structure
//! validation, instantiation through a catalog of factories, version and
//! dependency checks, registration, navigation, and startup.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`model`]**: The [`Plugin`] descriptor and the [`PluginPage`] units of
//!   navigable content it contributes.
//! - **[`structure`]**: Checks that a plugin unit directory has every module
//!   a unit must provide.
//! - **[`loader`]**: Discovers unit directories and instantiates plugins
//!   through the factories in a [`PluginCatalog`]. Failures are isolated per
//!   unit.
//! - **[`version`]**: Dotted version parsing and host version bound checks.
//! - **[`dependency`]**: Load ordering, cycle detection and advisory plugin
//!   validation.
//! - **[`registry`]**: The [`PluginRegistry`] of known plugins, enabled-set
//!   normalization, page lookup and callback registration.
//! - **[`navigation`]**: Section and group model for the host navigation.
//! - **[`enabled`]**: Import and export of enabled-plugin selections.
//! - **[`host`]**: The [`HostApp`] interface plugins register callbacks on.
//! - **[`manager`]**: The [`PluginManager`] aggregate the host drives at
//!   startup.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
pub mod dependency;
pub mod enabled;
pub mod error;
pub mod host;
pub mod loader;
pub mod manager;
pub mod model;
pub mod navigation;
pub mod registry;
pub mod structure;
pub mod version;

pub use dependency::{DependencyError, Resolution, ValidationReport};
pub use enabled::{EnabledPluginsDocument, EnabledSet};
pub use host::{EventHandler, HandlerTable, HostApp};
pub use loader::{PluginCatalog, PluginLoader};
pub use manager::{PluginManager, StartupReport};
pub use model::{ConfigSchema, Plugin, PluginPage};
pub use navigation::{NavigationGroup, NavigationSection};
pub use registry::{PluginMetadata, PluginRegistry, PluginStatus};
pub use version::AppVersion;

// Test module declaration
#[cfg(test)]
mod tests;
