use crate::styles;

/// Escape text for inclusion in markup
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn title(text: &str) -> String {
    format!("<h1 style=\"{}\">{}</h1>", styles::TITLE, escape(text))
}

/// A bordered card with a heading and body markup
pub fn card(heading: &str, body: &str) -> String {
    format!(
        "<section style=\"{}\"><h2>{}</h2>{}</section>",
        styles::CARD,
        escape(heading),
        body
    )
}

pub fn muted(text: &str) -> String {
    format!("<p style=\"{}\">{}</p>", styles::MUTED, escape(text))
}

pub fn select(id: &str, options: &[&str], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let marker = if *option == selected { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", escape(option), marker)
        })
        .collect();
    format!("<select id=\"{}\">{}</select>", escape(id), options)
}
