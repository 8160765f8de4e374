//! # Atrium Core
//!
//! Plugin management for the Atrium host: discovery of plugin units,
//! structure validation, version and dependency resolution, the plugin
//! registry with its navigation model, and per-plugin configuration storage.
pub mod error;
pub mod plugin_system;
pub mod storage;

// Re-export key public types for the binary and plugin crates
pub use error::{Error, Result};
pub use plugin_system::{
    EnabledSet, HostApp, Plugin, PluginCatalog, PluginLoader, PluginManager, PluginPage,
    PluginRegistry,
};
pub use storage::{ConfigStore, HostSettings, LocalStorageProvider, StorageProvider};

#[cfg(test)]
mod tests;
