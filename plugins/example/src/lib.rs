//! Example plugin. Opt-in, grouped under "Examples" in the Plugins section,
//! and configurable through a small schema.
use atrium_core::plugin_system::model::ConfigSchema;
use atrium_core::{Plugin, PluginPage};

pub mod callbacks;
pub mod components;
pub mod constants;
pub mod layout;
pub mod styles;

use constants::*;

/// Schema of this plugin's configuration document
pub fn config_schema() -> ConfigSchema {
    ConfigSchema::new()
        .require(GREETING_KEY)
        .property(GREETING_KEY, "string")
        .property(REPEAT_KEY, "integer")
}

/// Plugin factory looked up by the host
pub fn get_plugin() -> Plugin {
    Plugin::new(PLUGIN_ID, PLUGIN_NAME, "Demonstrates pages, callbacks and configuration")
        .with_version(PLUGIN_VERSION)
        .default_enabled(false)
        .with_dependency("core")
        .with_min_app_version("0.1")
        .with_config_schema(config_schema())
        .with_pages([
            PluginPage::new(HELLO_PAGE_ID, "Hello", "carbon:chat", SECTION, layout::hello)
                .with_group(GROUP, 10)
                .with_description("Greets the user"),
            PluginPage::new(COUNTER_PAGE_ID, "Counter", "carbon:add", SECTION, layout::counter)
                .with_group(GROUP, 10)
                .with_order(1),
        ])
        .with_callbacks(callbacks::register_callbacks)
}
