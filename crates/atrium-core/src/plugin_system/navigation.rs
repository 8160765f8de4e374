//! Navigation model built from the pages of enabled plugins.
use std::collections::HashMap;

use serde::Serialize;

use crate::plugin_system::model::PluginPage;

/// Canonical section order; sections outside this list are never shown
pub const SECTION_ORDER: [&str; 7] = [
    "Core",
    "Data",
    "Basics",
    "Design",
    "Model",
    "Multivariate",
    "Plugins",
];

/// Icon used for a section without a dedicated one
pub const DEFAULT_SECTION_ICON: &str = "carbon:document";

/// Icon for a navigation section
pub fn section_icon(section: &str) -> &'static str {
    match section {
        "Core" => "carbon:home",
        "Data" => "carbon:data-base",
        "Basics" => "carbon:calculator",
        "Design" => "carbon:chemistry",
        "Model" => "carbon:machine-learning",
        "Multivariate" => "carbon:chart-multitype",
        "Plugins" => "carbon:plugin",
        _ => DEFAULT_SECTION_ICON,
    }
}

/// Pages sharing a group label within a section
#[derive(Debug, Clone, Serialize)]
pub struct NavigationGroup<'a> {
    pub label: String,
    /// `group_order` of the first page after sorting
    pub order: i32,
    pub pages: Vec<&'a PluginPage>,
}

/// One top-level navigation section
#[derive(Debug, Clone, Serialize)]
pub struct NavigationSection<'a> {
    pub label: String,
    pub icon: String,
    /// Ungrouped pages sorted by `order`
    pub pages: Vec<&'a PluginPage>,
    /// Grouped pages, groups sorted by `(order, label)`
    pub groups: Vec<NavigationGroup<'a>>,
}

/// Group pages into sections following [`SECTION_ORDER`].
///
/// All sorts are stable, so pages with equal sort keys keep their input
/// order. Sections without pages or outside the canonical list are omitted.
pub fn build_navigation_sections<'a>(pages: &[&'a PluginPage]) -> Vec<NavigationSection<'a>> {
    let mut by_section: HashMap<&str, Vec<&'a PluginPage>> = HashMap::new();
    for &page in pages {
        by_section.entry(page.section.as_str()).or_default().push(page);
    }

    let mut sections = Vec::new();
    for section in SECTION_ORDER {
        let Some(section_pages) = by_section.remove(section) else {
            continue;
        };

        let mut flat: Vec<&'a PluginPage> = Vec::new();
        // Group labels in first-seen order so ties stay deterministic
        let mut group_labels: Vec<&str> = Vec::new();
        let mut grouped: HashMap<&str, Vec<&'a PluginPage>> = HashMap::new();

        for page in section_pages {
            match page.group.as_deref() {
                Some(group) if !group.is_empty() => {
                    if !grouped.contains_key(group) {
                        group_labels.push(group);
                    }
                    grouped.entry(group).or_default().push(page);
                }
                _ => flat.push(page),
            }
        }

        flat.sort_by_key(|page| page.order);

        let mut groups: Vec<NavigationGroup<'a>> = group_labels
            .into_iter()
            .filter_map(|label| {
                let mut group_pages = grouped.remove(label)?;
                group_pages.sort_by_key(|page| page.order);
                let order = group_pages.first()?.group_order;
                Some(NavigationGroup {
                    label: label.to_string(),
                    order,
                    pages: group_pages,
                })
            })
            .collect();
        groups.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.label.cmp(&b.label)));

        sections.push(NavigationSection {
            label: section.to_string(),
            icon: section_icon(section).to_string(),
            pages: flat,
            groups,
        });
    }
    sections
}
