use crate::components::{card, muted, select, title};
use crate::constants::{DEFAULT_THEME, THEMES};
use crate::styles;

fn page(body: String) -> String {
    format!("<main style=\"{}\">{}</main>", styles::PAGE, body)
}

/// Landing page
pub fn home() -> String {
    page(format!(
        "{}{}{}",
        title("Welcome to Atrium"),
        muted("Pick a section in the navigation to get started."),
        card(
            "Plugins",
            "<p>Every section is contributed by a plugin. Manage them under Settings.</p>"
        )
    ))
}

/// Host settings page
pub fn settings() -> String {
    page(format!(
        "{}{}",
        title("Settings"),
        card("Theme", &select("theme-select", &THEMES, DEFAULT_THEME))
    ))
}
