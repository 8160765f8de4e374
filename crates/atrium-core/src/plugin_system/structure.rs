use std::fmt;
use std::path::{Path, PathBuf};

/// Entry module of a plugin unit; its presence marks a directory as a unit
pub const ENTRY_MODULE: &str = "src/lib.rs";

/// Files every plugin unit must provide, relative to the unit directory
pub const REQUIRED_MODULES: [&str; 6] = [
    ENTRY_MODULE,
    "src/layout.rs",
    "src/components.rs",
    "src/callbacks.rs",
    "src/styles.rs",
    "src/constants.rs",
];

/// Outcome of a structure check on one plugin unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    pub unit: PathBuf,
    pub missing: Vec<String>,
}

impl StructureReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for StructureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}: ok", self.unit.display())
        } else {
            write!(f, "Missing required files: {}", self.missing.join(", "))
        }
    }
}

/// Check that `unit` contains every required module. Reads metadata only.
pub fn validate_structure(unit: &Path) -> StructureReport {
    let missing = REQUIRED_MODULES
        .iter()
        .filter(|module| !unit.join(module).is_file())
        .map(|module| module.to_string())
        .collect();

    StructureReport {
        unit: unit.to_path_buf(),
        missing,
    }
}

/// Whether `unit` has an entry module
pub fn has_entry_module(unit: &Path) -> bool {
    unit.join(ENTRY_MODULE).is_file()
}
