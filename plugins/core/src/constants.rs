pub const PLUGIN_ID: &str = "core";
pub const PLUGIN_NAME: &str = "Core";
pub const PLUGIN_VERSION: &str = "1.0.0";
pub const SECTION: &str = "Core";

pub const HOME_PAGE_ID: &str = "home";
pub const SETTINGS_PAGE_ID: &str = "settings";

/// Events this plugin handles on the host
pub const PING_EVENT: &str = "core.ping";
pub const THEME_EVENT: &str = "core.theme";

pub const THEMES: [&str; 2] = ["light", "dark"];
pub const DEFAULT_THEME: &str = "light";
