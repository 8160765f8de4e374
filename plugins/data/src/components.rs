use crate::styles;

pub fn heading(text: &str) -> String {
    format!("<h1>{}</h1>", text)
}

/// A headed table; every row must have as many cells as there are columns
pub fn table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let head: String = columns
        .iter()
        .map(|c| format!("<th style=\"{}\">{}</th>", styles::CELL, c))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td style=\"{}\">{}</td>", styles::CELL, cell))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!(
        "<table style=\"{}\"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        styles::TABLE,
        head,
        body
    )
}

pub fn stat(label: &str, value: &str) -> String {
    format!(
        "<div style=\"{}\"><small>{}</small><strong>{}</strong></div>",
        styles::STAT,
        label,
        value
    )
}
