use crate::components::{heading, stat, table};
use crate::constants::{DEFAULT_PAGE_SIZE, TRANSFORMS};
use crate::styles;

fn page(body: String) -> String {
    format!("<main style=\"{}\">{}</main>", styles::PAGE, body)
}

pub fn overview() -> String {
    page(format!(
        "{}{}{}",
        heading("Data overview"),
        stat("Datasets", "0"),
        stat("Rows per page", &DEFAULT_PAGE_SIZE.to_string())
    ))
}

pub fn view() -> String {
    page(format!(
        "{}{}",
        heading("View"),
        table(&["Column", "Type", "Missing"], &[])
    ))
}

pub fn pivot() -> String {
    page(format!(
        "{}{}",
        heading("Pivot"),
        table(&["Rows", "Columns", "Values"], &[])
    ))
}

pub fn transform() -> String {
    let rows: Vec<Vec<String>> = TRANSFORMS
        .iter()
        .map(|name| vec![name.to_string()])
        .collect();
    page(format!("{}{}", heading("Transform"), table(&["Transform"], &rows)))
}
