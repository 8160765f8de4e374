//! Core plugin: the landing page and host settings. Always enabled.
use atrium_core::{Plugin, PluginPage};

pub mod callbacks;
pub mod components;
pub mod constants;
pub mod layout;
pub mod styles;

use constants::{HOME_PAGE_ID, PLUGIN_ID, PLUGIN_NAME, PLUGIN_VERSION, SECTION, SETTINGS_PAGE_ID};

/// Plugin factory looked up by the host
pub fn get_plugin() -> Plugin {
    Plugin::new(PLUGIN_ID, PLUGIN_NAME, "Landing page and host settings")
        .with_version(PLUGIN_VERSION)
        .locked(true)
        .with_pages([
            PluginPage::new(HOME_PAGE_ID, "Home", "carbon:home", SECTION, layout::home)
                .with_description("Landing page"),
            PluginPage::new(
                SETTINGS_PAGE_ID,
                "Settings",
                "carbon:settings",
                SECTION,
                layout::settings,
            )
            .with_order(1),
        ])
        .with_callbacks(callbacks::register_callbacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::HostApp;
    use atrium_core::plugin_system::host::HandlerTable;
    use serde_json::json;

    #[test]
    fn test_descriptor() {
        let plugin = get_plugin();
        assert_eq!(plugin.id, "core");
        assert!(plugin.locked);
        assert!(plugin.dependencies.is_empty());
        let ids: Vec<&str> = plugin.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "settings"]);
    }

    #[test]
    fn test_pages_render() {
        let plugin = get_plugin();
        assert!(plugin.page("home").unwrap().render().contains("Welcome to Atrium"));
        let settings = plugin.page("settings").unwrap().render();
        assert!(settings.contains("<option value=\"light\" selected>"));
    }

    #[test]
    fn test_callbacks() {
        let mut host = HandlerTable::new("test");
        get_plugin().register_callbacks(&mut host).unwrap();
        assert_eq!(host.name(), "test");
        assert_eq!(host.dispatch("core.ping", &json!(null)).unwrap()["status"], "ok");
        assert_eq!(
            host.dispatch("core.theme", &json!({"theme": "dark"})),
            Some(json!({"theme": "dark"}))
        );
        assert_eq!(
            host.dispatch("core.theme", &json!({"theme": "neon"})),
            Some(json!({"theme": "light"}))
        );
    }
}
