use crate::components::{button, output};
use crate::constants::DEFAULT_GREETING;
use crate::styles;

pub fn hello() -> String {
    format!(
        "<main style=\"{}\"><h1>{}, world</h1>{}{}</main>",
        styles::PAGE,
        DEFAULT_GREETING,
        button("greet-button", "Greet"),
        output("greet-output", "")
    )
}

pub fn counter() -> String {
    format!(
        "<main style=\"{}\"><h1>Counter</h1>{}{}</main>",
        styles::PAGE,
        button("increment-button", "+1"),
        output("counter-output", "0")
    )
}
