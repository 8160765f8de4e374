use crate::plugin_system::model::PluginPage;
use crate::plugin_system::navigation::{
    DEFAULT_SECTION_ICON, SECTION_ORDER, build_navigation_sections, section_icon,
};

fn page(id: &str, section: &str, order: i32) -> PluginPage {
    PluginPage::new(id, id, "carbon:document", section, String::new).with_order(order)
}

#[test]
fn test_grouped_and_flat_pages_in_one_section() {
    let overview = page("data-overview", "Data", 1);
    let pivot = page("data-pivot", "Data", 1).with_group("Advanced", 5);

    let sections = build_navigation_sections(&[&overview, &pivot]);

    assert_eq!(sections.len(), 1);
    let data = &sections[0];
    assert_eq!(data.label, "Data");
    assert_eq!(data.icon, "carbon:data-base");
    assert_eq!(data.pages.len(), 1);
    assert_eq!(data.pages[0].id, "data-overview");
    assert_eq!(data.groups.len(), 1);
    assert_eq!(data.groups[0].label, "Advanced");
    assert_eq!(data.groups[0].order, 5);
    assert_eq!(data.groups[0].pages[0].id, "data-pivot");
}

#[test]
fn test_sections_follow_canonical_order_and_skip_unknown() {
    let pages = [
        page("extra", "Plugins", 0),
        page("regress", "Model", 0),
        page("home", "Core", 0),
        page("secret", "Hidden", 0),
    ];
    let refs: Vec<&PluginPage> = pages.iter().collect();

    let labels: Vec<String> = build_navigation_sections(&refs)
        .into_iter()
        .map(|s| s.label)
        .collect();
    assert_eq!(labels, vec!["Core", "Model", "Plugins"]);
}

#[test]
fn test_no_pages_no_sections() {
    assert!(build_navigation_sections(&[]).is_empty());
}

#[test]
fn test_pages_sorted_by_order_with_stable_ties() {
    let pages = [
        page("third", "Basics", 3),
        page("first-a", "Basics", 1),
        page("first-b", "Basics", 1),
        page("zero", "Basics", 0),
    ];
    let refs: Vec<&PluginPage> = pages.iter().collect();

    let sections = build_navigation_sections(&refs);
    let ids: Vec<&str> = sections[0].pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["zero", "first-a", "first-b", "third"]);
}

#[test]
fn test_groups_sorted_by_order_then_label() {
    let pages = [
        page("z1", "Design", 0).with_group("Zeta", 1),
        page("a1", "Design", 0).with_group("Alpha", 1),
        page("e2", "Design", 2).with_group("Early", 0),
        page("e1", "Design", 1).with_group("Early", 0),
    ];
    let refs: Vec<&PluginPage> = pages.iter().collect();

    let sections = build_navigation_sections(&refs);
    let groups: Vec<&str> = sections[0].groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(groups, vec!["Early", "Alpha", "Zeta"]);

    let early: Vec<&str> = sections[0].groups[0].pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(early, vec!["e1", "e2"]);
    assert!(sections[0].pages.is_empty());
}

#[test]
fn test_empty_group_label_counts_as_ungrouped() {
    let page = page("plain", "Multivariate", 0).with_group("", 3);
    let sections = build_navigation_sections(&[&page]);
    assert_eq!(sections[0].pages.len(), 1);
    assert!(sections[0].groups.is_empty());
}

#[test]
fn test_section_icons() {
    assert_eq!(SECTION_ORDER.len(), 7);
    assert_eq!(section_icon("Core"), "carbon:home");
    assert_eq!(section_icon("Plugins"), "carbon:plugin");
    assert_eq!(section_icon("Elsewhere"), DEFAULT_SECTION_ICON);
}

#[test]
fn test_navigation_serializes_without_render_hooks() {
    let page = page("home", "Core", 0).with_description("Landing page");
    let sections = build_navigation_sections(&[&page]);
    let value = serde_json::to_value(&sections).unwrap();

    assert_eq!(value[0]["label"], "Core");
    assert_eq!(value[0]["pages"][0]["id"], "home");
    assert_eq!(value[0]["pages"][0]["description"], "Landing page");
    assert!(value[0]["groups"].as_array().unwrap().is_empty());
}
