pub const PAGE: &str = "padding: 24px; max-width: 960px;";
pub const CARD: &str = "border: 1px solid #e0e0e0; border-radius: 8px; padding: 16px; margin-bottom: 12px;";
pub const TITLE: &str = "font-size: 1.5rem; font-weight: 600;";
pub const MUTED: &str = "color: #6f6f6f;";
