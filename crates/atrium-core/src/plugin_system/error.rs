//! # Atrium Plugin System Errors
//!
//! Defines error types specific to the plugin system.
//!
//! [`PluginSystemError`] covers unit discovery and loading, registration
//! invariants, callback registration, and the enabled-plugins interchange
//! document. Dependency graph failures have their own
//! [`DependencyError`](crate::plugin_system::dependency::DependencyError).
use std::path::PathBuf;

use crate::plugin_system::model::CallbackError;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin loading failed for '{unit}': {source}")]
    LoadingError {
        unit: String,
        path: Option<PathBuf>,
        #[source]
        source: Box<PluginSystemErrorSource>,
    },

    #[error("Plugin unit '{unit}' has an invalid structure: missing {}", .missing.join(", "))]
    InvalidStructure { unit: String, missing: Vec<String> },

    #[error("No factory registered for plugin unit '{0}'")]
    FactoryNotFound(String),

    #[error("Page id '{page_id}' of plugin '{plugin_id}' is already provided by '{owner}'")]
    DuplicatePage {
        plugin_id: String,
        page_id: String,
        owner: String,
    },

    #[error("Callback registration failed for plugin '{plugin_id}': {source}")]
    CallbackRegistration {
        plugin_id: String,
        #[source]
        source: CallbackError,
    },

    #[error("Invalid enabled-plugins document: {message}")]
    InvalidEnabledDocument {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemErrorSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("factory failed: {0}")]
    Factory(CallbackError),
    #[error("factory panicked: {0}")]
    Panic(String),
    #[error("Other: {0}")]
    Other(String),
}
