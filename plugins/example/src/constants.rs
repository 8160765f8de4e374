pub const PLUGIN_ID: &str = "example";
pub const PLUGIN_NAME: &str = "Example";
pub const PLUGIN_VERSION: &str = "0.3.0";
pub const SECTION: &str = "Plugins";
pub const GROUP: &str = "Examples";

pub const HELLO_PAGE_ID: &str = "example-hello";
pub const COUNTER_PAGE_ID: &str = "example-counter";

pub const GREET_EVENT: &str = "example.greet";
pub const INCREMENT_EVENT: &str = "example.increment";

/// Config keys
pub const GREETING_KEY: &str = "greeting";
pub const REPEAT_KEY: &str = "repeat";

pub const DEFAULT_GREETING: &str = "Hello";
