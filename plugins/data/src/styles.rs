pub const PAGE: &str = "padding: 24px;";
pub const TABLE: &str = "border-collapse: collapse; width: 100%;";
pub const CELL: &str = "border-bottom: 1px solid #e0e0e0; padding: 4px 8px; text-align: left;";
pub const STAT: &str = "display: inline-block; min-width: 120px; margin-right: 16px;";
