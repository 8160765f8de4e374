pub const PLUGIN_ID: &str = "data";
pub const PLUGIN_NAME: &str = "Data";
pub const PLUGIN_VERSION: &str = "1.2.0";
pub const SECTION: &str = "Data";

/// Group holding the less common data tools
pub const ADVANCED_GROUP: &str = "Advanced";
pub const ADVANCED_GROUP_ORDER: i32 = 5;

pub const OVERVIEW_PAGE_ID: &str = "data-overview";
pub const VIEW_PAGE_ID: &str = "data-view";
pub const PIVOT_PAGE_ID: &str = "data-pivot";
pub const TRANSFORM_PAGE_ID: &str = "data-transform";

pub const SUMMARY_EVENT: &str = "data.summary";

/// Rows shown per page in the viewer
pub const DEFAULT_PAGE_SIZE: u64 = 25;

pub const TRANSFORMS: [&str; 4] = ["as_integer", "as_numeric", "as_factor", "as_character"];
