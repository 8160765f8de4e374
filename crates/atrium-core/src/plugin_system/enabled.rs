//! Import and export of enabled-plugin selections.
//!
//! The interchange document is a JSON object holding a list of plugin ids
//! under `enabled_plugins`, or under `plugins` for older exports.
use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::plugin_system::error::PluginSystemError;

/// A normalized, deterministic set of plugin ids
pub type EnabledSet = BTreeSet<String>;

/// Primary key of the interchange document
pub const ENABLED_PLUGINS_KEY: &str = "enabled_plugins";

/// Key accepted when the primary one is absent
pub const FALLBACK_PLUGINS_KEY: &str = "plugins";

/// Exported form of an enabled-plugin selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledPluginsDocument {
    pub enabled_plugins: Vec<String>,
}

impl EnabledPluginsDocument {
    pub fn new(enabled: &EnabledSet) -> Self {
        Self {
            enabled_plugins: enabled.iter().cloned().collect(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, PluginSystemError> {
        serde_json::to_string_pretty(self).map_err(|e| PluginSystemError::InvalidEnabledDocument {
            message: "failed to serialize document".to_string(),
            source: Some(e),
        })
    }

    /// Parse a document, accepting either key. String ids are returned as
    /// written and other entries are dropped; filtering against known plugins
    /// is the registry's job.
    pub fn from_json(data: &str) -> Result<Self, PluginSystemError> {
        let payload: Value =
            serde_json::from_str(data).map_err(|e| PluginSystemError::InvalidEnabledDocument {
                message: "document is not valid JSON".to_string(),
                source: Some(e),
            })?;

        let object = payload
            .as_object()
            .ok_or_else(|| invalid("document must be a JSON object"))?;

        let list = object
            .get(ENABLED_PLUGINS_KEY)
            .or_else(|| object.get(FALLBACK_PLUGINS_KEY))
            .ok_or_else(|| invalid("missing enabled_plugins list"))?
            .as_array()
            .ok_or_else(|| invalid("enabled_plugins must be an array"))?;

        let enabled_plugins = list
            .iter()
            .filter_map(|item| match item.as_str() {
                Some(id) => Some(id.to_string()),
                None => {
                    debug!("Dropping non-string plugin id {}", item);
                    None
                }
            })
            .collect();

        Ok(Self { enabled_plugins })
    }
}

fn invalid(message: &str) -> PluginSystemError {
    PluginSystemError::InvalidEnabledDocument {
        message: message.to_string(),
        source: None,
    }
}
