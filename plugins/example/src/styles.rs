pub const PAGE: &str = "padding: 24px;";
pub const BUTTON: &str = "padding: 6px 12px; border-radius: 4px;";
