#![cfg(test)]

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::plugin_system::host::HostApp;
use crate::plugin_system::loader::{DEFAULT_NAMESPACE, PluginCatalog, qualified_name};
use crate::plugin_system::model::{ConfigSchema, Plugin, PluginPage};
use crate::plugin_system::structure::REQUIRED_MODULES;

/// Write a plugin unit with every required module under `root/name`
pub fn create_unit(root: &Path, name: &str) {
    for module in REQUIRED_MODULES {
        let path = root.join(name).join(module);
        fs::create_dir_all(path.parent().expect("module path has a parent"))
            .expect("Failed to create unit directory");
        fs::write(&path, format!("// {} of {}\n", module, name)).expect("Failed to write module");
    }
}

pub fn home_plugin() -> Plugin {
    Plugin::new("home", "Home", "Landing pages")
        .locked(true)
        .with_page(PluginPage::new("home", "Home", "carbon:home", "Core", || {
            "<home/>".to_string()
        }))
        .with_callbacks(|host: &mut dyn HostApp| {
            host.register_handler("home", "home.greet", Box::new(|_: &Value| Value::from("hello")))
        })
}

pub fn tables_plugin() -> Plugin {
    Plugin::new("tables", "Tables", "Data tables")
        .with_dependency("home")
        .with_pages([
            PluginPage::new("tables-view", "View", "carbon:table", "Data", || "<view/>".to_string())
                .with_order(1),
            PluginPage::new("tables-pivot", "Pivot", "carbon:table-split", "Data", || {
                "<pivot/>".to_string()
            })
            .with_group("Advanced", 5)
            .with_order(1),
        ])
        .with_config_schema(
            ConfigSchema::new()
                .require("page_size")
                .property("page_size", "integer"),
        )
}

pub fn charts_plugin() -> Plugin {
    Plugin::new("charts", "Charts", "Opt-in charts")
        .default_enabled(false)
        .with_min_app_version("1.2")
        .with_page(PluginPage::new("charts", "Charts", "carbon:chart", "Plugins", || {
            "<charts/>".to_string()
        }))
}

/// Catalog with factories for `home`, `tables` and `charts`
pub fn test_catalog() -> PluginCatalog {
    let mut catalog = PluginCatalog::new();
    catalog
        .register_fn(&qualified_name(DEFAULT_NAMESPACE, "home"), home_plugin)
        .register_fn(&qualified_name(DEFAULT_NAMESPACE, "tables"), tables_plugin)
        .register_fn(&qualified_name(DEFAULT_NAMESPACE, "charts"), charts_plugin);
    catalog
}
