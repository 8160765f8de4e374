use serde_json::Value;
use tempfile::tempdir;

use super::common::{create_unit, test_catalog};
use crate::plugin_system::enabled::EnabledSet;
use crate::plugin_system::host::HandlerTable;
use crate::plugin_system::loader::{DEFAULT_NAMESPACE, PluginLoader};
use crate::plugin_system::manager::PluginManager;
use crate::plugin_system::registry::PluginRegistry;
use crate::storage::ConfigStore;

fn populated_manager(app_version: &str) -> (PluginManager, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp directory");
    let plugins_dir = dir.path().join("plugins");
    for unit in ["home", "tables", "charts", "_drafts"] {
        create_unit(&plugins_dir, unit);
    }

    let mut manager = PluginManager::new(
        PluginRegistry::new(),
        ConfigStore::new(dir.path().join("config")),
        app_version,
    );
    let loader = PluginLoader::new(test_catalog());
    let registered = manager.load_plugins_from_directory(&loader, &plugins_dir, DEFAULT_NAMESPACE);
    assert_eq!(registered, 3);
    (manager, dir)
}

#[test]
fn test_discovery_to_startup() {
    let (manager, _dir) = populated_manager("1.0");
    let registry = manager.registry();

    let order = registry.resolve().ids();
    let home = order.iter().position(|id| id == "home").unwrap();
    let tables = order.iter().position(|id| id == "tables").unwrap();
    assert!(home < tables);

    let mut host = HandlerTable::new("integration");
    let report = manager.startup(&mut host, None).expect("startup should succeed");
    let expected: EnabledSet = ["home", "tables"].iter().map(|s| s.to_string()).collect();
    assert_eq!(report.enabled, expected);
    assert_eq!(report.callbacks_registered, 1);
    assert_eq!(host.dispatch("home.greet", &Value::Null), Some(Value::from("hello")));

    let sections = registry.build_navigation(&report.enabled);
    let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Core", "Data"]);
    let data = &sections[1];
    assert_eq!(data.pages[0].id, "tables-view");
    assert_eq!(data.groups[0].label, "Advanced");
    assert_eq!(data.groups[0].pages[0].render(), "<pivot/>");
}

#[test]
fn test_opt_in_plugin_blocked_by_old_host() {
    let (manager, _dir) = populated_manager("1.0");
    let requested: EnabledSet = ["charts"].iter().map(|s| s.to_string()).collect();

    let mut host = HandlerTable::new("integration");
    let report = manager.startup(&mut host, Some(&requested)).unwrap();
    assert_eq!(report.excluded, vec!["charts"]);
    assert!(report.enabled.contains("home"));
    assert!(!report.enabled.contains("charts"));
}

#[test]
fn test_opt_in_plugin_on_new_host() {
    let (manager, _dir) = populated_manager("1.2.0");
    let requested: EnabledSet = ["charts"].iter().map(|s| s.to_string()).collect();

    let mut host = HandlerTable::new("integration");
    let report = manager.startup(&mut host, Some(&requested)).unwrap();
    assert!(report.excluded.is_empty());
    assert_eq!(report.enabled.len(), 2);

    let pages = manager.registry().get_page_registry(&report.enabled);
    assert_eq!(pages["charts"].render(), "<charts/>");
}

#[test]
fn test_enabled_selection_survives_export_and_import() {
    let (manager, dir) = populated_manager("2.0");
    let registry = manager.registry();
    let requested: EnabledSet = ["charts"].iter().map(|s| s.to_string()).collect();

    let json = registry
        .export_enabled_plugins(Some(&requested))
        .to_json()
        .unwrap();
    let path = dir.path().join("enabled.json");
    std::fs::write(&path, &json).unwrap();

    let imported = registry
        .import_enabled_plugins(&std::fs::read_to_string(&path).unwrap())
        .unwrap();
    assert_eq!(imported, registry.normalize_enabled_plugins(Some(&requested)));
}
