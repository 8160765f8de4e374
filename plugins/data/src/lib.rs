//! Data plugin: dataset pages in the Data section, with the pivot and
//! transform tools grouped under "Advanced".
use atrium_core::{Plugin, PluginPage};

pub mod callbacks;
pub mod components;
pub mod constants;
pub mod layout;
pub mod styles;

use constants::*;

/// Plugin factory looked up by the host
pub fn get_plugin() -> Plugin {
    Plugin::new(PLUGIN_ID, PLUGIN_NAME, "Dataset overview, viewer and tools")
        .with_version(PLUGIN_VERSION)
        .with_dependency("core")
        .with_min_app_version("0.1.0")
        .with_pages([
            PluginPage::new(OVERVIEW_PAGE_ID, "Overview", "carbon:data-base", SECTION, layout::overview)
                .with_order(1),
            PluginPage::new(VIEW_PAGE_ID, "View", "carbon:table", SECTION, layout::view).with_order(2),
            PluginPage::new(PIVOT_PAGE_ID, "Pivot", "carbon:table-split", SECTION, layout::pivot)
                .with_group(ADVANCED_GROUP, ADVANCED_GROUP_ORDER)
                .with_order(1),
            PluginPage::new(
                TRANSFORM_PAGE_ID,
                "Transform",
                "carbon:data-refinery",
                SECTION,
                layout::transform,
            )
            .with_group(ADVANCED_GROUP, ADVANCED_GROUP_ORDER)
            .with_order(2),
        ])
        .with_callbacks(callbacks::register_callbacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::plugin_system::host::HandlerTable;
    use atrium_core::plugin_system::navigation::build_navigation_sections;
    use serde_json::json;

    #[test]
    fn test_navigation_groups() {
        let plugin = get_plugin();
        let pages: Vec<&PluginPage> = plugin.pages.iter().collect();
        let sections = build_navigation_sections(&pages);

        assert_eq!(sections.len(), 1);
        let ungrouped: Vec<&str> = sections[0].pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ungrouped, vec!["data-overview", "data-view"]);
        assert_eq!(sections[0].groups[0].label, "Advanced");
        assert_eq!(sections[0].groups[0].pages.len(), 2);
    }

    #[test]
    fn test_depends_on_core() {
        assert_eq!(get_plugin().dependencies, vec!["core"]);
    }

    #[test]
    fn test_transform_page_lists_transforms() {
        let html = get_plugin().page("data-transform").unwrap().render();
        for name in TRANSFORMS {
            assert!(html.contains(name));
        }
    }

    #[test]
    fn test_summary_handler() {
        let mut host = HandlerTable::new("test");
        get_plugin().register_callbacks(&mut host).unwrap();

        let result = host
            .dispatch("data.summary", &json!({"values": [1, 2, "x", 6]}))
            .unwrap();
        assert_eq!(result, json!({"count": 3, "mean": 3.0, "min": 1.0, "max": 6.0}));
        assert_eq!(host.dispatch("data.summary", &json!({})), Some(json!({"count": 0})));
    }
}
