use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::plugin_system::host::HostApp;

/// Error type returned by plugin-provided hooks and factories
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Zero-argument content producer for a page. The returned markup is opaque
/// to the plugin system and only consumed by the host's page router.
pub type RenderFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Hook invoked once by the host when a plugin becomes active
pub type RegisterCallbacksFn =
    Arc<dyn Fn(&mut dyn HostApp) -> Result<(), CallbackError> + Send + Sync>;

/// A unit of navigable content contributed by a plugin
#[derive(Clone)]
pub struct PluginPage {
    /// Globally unique page identifier (used for routing)
    pub id: String,

    /// Display name shown in navigation
    pub label: String,

    /// Icon identifier (e.g. "carbon:home")
    pub icon: String,

    /// Top-level navigation section
    pub section: String,

    /// Optional sub-grouping within the section
    pub group: Option<String>,

    /// Sort key within the group or section
    pub order: i32,

    /// Sort key of the group itself within the section
    pub group_order: i32,

    /// Optional description of the page's purpose
    pub description: Option<String>,

    render: RenderFn,
}

impl PluginPage {
    /// Create a new ungrouped page with order 0
    pub fn new<F>(id: &str, label: &str, icon: &str, section: &str, render: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            section: section.to_string(),
            group: None,
            order: 0,
            group_order: 0,
            description: None,
            render: Arc::new(render),
        }
    }

    /// Place the page in a named group with the given group sort key
    pub fn with_group(mut self, group: &str, group_order: i32) -> Self {
        self.group = Some(group.to_string());
        self.group_order = group_order;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Produce the page content
    pub fn render(&self) -> String {
        (self.render)()
    }
}

impl fmt::Debug for PluginPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginPage")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("section", &self.section)
            .field("group", &self.group)
            .field("order", &self.order)
            .field("group_order", &self.group_order)
            .finish_non_exhaustive()
    }
}

impl Serialize for PluginPage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("PluginPage", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("icon", &self.icon)?;
        state.serialize_field("section", &self.section)?;
        state.serialize_field("group", &self.group)?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("group_order", &self.group_order)?;
        state.serialize_field("description", &self.description)?;
        state.end()
    }
}

/// Declared type of a single configuration property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name: string, integer, number, boolean, array, object
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Schema describing the configuration document a plugin accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a field as required
    pub fn require(mut self, field: &str) -> Self {
        self.required.push(field.to_string());
        self
    }

    /// Declare the type of a field
    pub fn property(mut self, field: &str, type_name: &str) -> Self {
        self.properties.insert(
            field.to_string(),
            PropertySchema {
                type_name: Some(type_name.to_string()),
            },
        );
        self
    }
}

/// Descriptor of a plugin and the pages it contributes.
///
/// Produced once by a plugin's factory during discovery and never mutated
/// afterwards; the registry shares it behind an `Arc`.
#[derive(Clone)]
pub struct Plugin {
    /// Unique, stable identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Brief description of the plugin's functionality
    pub description: String,

    /// Dotted version string (e.g. "1.2.3")
    pub version: String,

    /// Pages contributed by this plugin, in declaration order
    pub pages: Vec<PluginPage>,

    /// Ids of plugins this plugin depends on
    pub dependencies: Vec<String>,

    /// Inclusive lower bound on the host application version
    pub min_app_version: Option<String>,

    /// Inclusive upper bound on the host application version
    pub max_app_version: Option<String>,

    /// Whether the plugin is enabled when no explicit selection exists
    pub default_enabled: bool,

    /// Locked plugins are always enabled
    pub locked: bool,

    /// Optional schema for the plugin's configuration document
    pub config_schema: Option<ConfigSchema>,

    /// Plugin marketplace/repository URL (optional)
    pub marketplace_url: Option<String>,

    register_callbacks: Option<RegisterCallbacksFn>,
}

impl Plugin {
    /// Create a new plugin descriptor with default settings
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            version: "1.0".to_string(),
            pages: Vec::new(),
            dependencies: Vec::new(),
            min_app_version: None,
            max_app_version: None,
            default_enabled: true,
            locked: false,
            config_schema: None,
            marketplace_url: None,
            register_callbacks: None,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_page(mut self, page: PluginPage) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_pages<I: IntoIterator<Item = PluginPage>>(mut self, pages: I) -> Self {
        self.pages.extend(pages);
        self
    }

    /// Add a dependency on another plugin id. Repeated ids are kept once.
    pub fn with_dependency(mut self, plugin_id: &str) -> Self {
        if !self.dependencies.iter().any(|d| d == plugin_id) {
            self.dependencies.push(plugin_id.to_string());
        }
        self
    }

    pub fn with_min_app_version(mut self, version: &str) -> Self {
        self.min_app_version = Some(version.to_string());
        self
    }

    pub fn with_max_app_version(mut self, version: &str) -> Self {
        self.max_app_version = Some(version.to_string());
        self
    }

    pub fn default_enabled(mut self, enabled: bool) -> Self {
        self.default_enabled = enabled;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_config_schema(mut self, schema: ConfigSchema) -> Self {
        self.config_schema = Some(schema);
        self
    }

    pub fn with_marketplace_url(mut self, url: &str) -> Self {
        self.marketplace_url = Some(url.to_string());
        self
    }

    /// Attach the hook the host calls once when this plugin becomes active
    pub fn with_callbacks<F>(mut self, register: F) -> Self
    where
        F: Fn(&mut dyn HostApp) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.register_callbacks = Some(Arc::new(register));
        self
    }

    pub fn has_callbacks(&self) -> bool {
        self.register_callbacks.is_some()
    }

    /// Run the plugin's callback hook, if any, against the host
    pub fn register_callbacks(&self, host: &mut dyn HostApp) -> Result<(), CallbackError> {
        match &self.register_callbacks {
            Some(register) => register(host),
            None => Ok(()),
        }
    }

    /// Look up one of this plugin's pages by id
    pub fn page(&self, page_id: &str) -> Option<&PluginPage> {
        self.pages.iter().find(|page| page.id == page_id)
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("pages", &self.pages)
            .field("dependencies", &self.dependencies)
            .field("min_app_version", &self.min_app_version)
            .field("max_app_version", &self.max_app_version)
            .field("default_enabled", &self.default_enabled)
            .field("locked", &self.locked)
            .field("has_callbacks", &self.register_callbacks.is_some())
            .finish_non_exhaustive()
    }
}
