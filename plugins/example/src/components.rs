use crate::styles;

pub fn button(id: &str, label: &str) -> String {
    format!("<button id=\"{}\" style=\"{}\">{}</button>", id, styles::BUTTON, label)
}

pub fn output(id: &str, initial: &str) -> String {
    format!("<output id=\"{}\">{}</output>", id, initial)
}
