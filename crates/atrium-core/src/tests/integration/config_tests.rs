use serde_json::json;
use tempfile::tempdir;

use super::common::{create_unit, test_catalog};
use crate::plugin_system::loader::{DEFAULT_NAMESPACE, PluginLoader};
use crate::plugin_system::registry::PluginRegistry;
use crate::storage::{ConfigDocument, ConfigStore};

#[test]
fn test_plugin_config_lifecycle() {
    let dir = tempdir().expect("Failed to create temp directory");
    let plugins_dir = dir.path().join("plugins");
    create_unit(&plugins_dir, "tables");

    let mut registry = PluginRegistry::new();
    registry.discover_plugins(&PluginLoader::new(test_catalog()), &plugins_dir, DEFAULT_NAMESPACE);
    let tables = registry.get_plugin("tables").expect("tables should be registered");

    let store = ConfigStore::new(dir.path().join("config"));
    let config = store.load_config("tables");
    let (ok, errors) = store.validate_config(&tables, &config);
    assert!(!ok);
    assert_eq!(errors, vec!["Missing required field: page_size"]);

    assert!(store.set_setting("tables", "page_size", json!(50)));
    let (ok, _) = store.validate_config(&tables, &store.load_config("tables"));
    assert!(ok);

    assert!(store.set_setting("tables", "page_size", json!("fifty")));
    let (ok, errors) = store.validate_config(&tables, &store.load_config("tables"));
    assert!(!ok);
    assert_eq!(errors, vec!["Field 'page_size' has type string, expected integer"]);

    assert_eq!(store.list_configs(), vec!["tables"]);
    assert!(store.delete_config("tables"));
    assert_eq!(store.load_config("tables"), ConfigDocument::new());
}
