use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::plugin_system::model::Plugin;

/// Error type for version parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("Invalid version format")]
    InvalidFormat,
    #[error("Version parse error: {0}")]
    ParseError(String),
}

/// A dotted numeric version such as "1.2.3".
///
/// Versions of different arity compare as if the shorter one were padded
/// with trailing zeros, so "1.2" equals "1.2.0" and is lower than "1.2.0.1".
#[derive(Debug, Clone)]
pub struct AppVersion {
    parts: Vec<u64>,
}

impl AppVersion {
    /// Creates a new version from its components
    pub fn new(parts: Vec<u64>) -> Self {
        Self { parts }
    }

    /// The fallback used for unparsable version strings
    pub fn lowest() -> Self {
        Self::new(vec![0, 0, 0])
    }

    /// Strictly parses a dotted version string
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(VersionError::InvalidFormat);
        }

        let parts = trimmed
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|e| VersionError::ParseError(format!("'{}': {}", part, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(parts))
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for AppVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AppVersion {}

impl PartialOrd for AppVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AppVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl FromStr for AppVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppVersion::parse(s)
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}

/// Parse a version string, falling back to `0.0.0` when it is not a valid
/// dotted numeric version.
pub fn parse_version(version: &str) -> AppVersion {
    AppVersion::parse(version).unwrap_or_else(|e| {
        warn!("Invalid version string '{}': {}", version, e);
        AppVersion::lowest()
    })
}

/// Check a plugin's inclusive host version bounds against `app_version`.
/// Returns `Err` with a human-readable reason when a bound is violated.
/// Blank bounds are treated as absent.
pub fn check_version_compatibility(plugin: &Plugin, app_version: &str) -> Result<(), String> {
    let app = parse_version(app_version);

    if let Some(min) = declared_bound(&plugin.min_app_version) {
        if app < parse_version(min) {
            return Err(format!(
                "Plugin '{}' requires app version >= {}",
                plugin.name, min
            ));
        }
    }

    if let Some(max) = declared_bound(&plugin.max_app_version) {
        if app > parse_version(max) {
            return Err(format!(
                "Plugin '{}' requires app version <= {}",
                plugin.name, max
            ));
        }
    }

    Ok(())
}

fn declared_bound(bound: &Option<String>) -> Option<&str> {
    bound.as_deref().filter(|b| !b.trim().is_empty())
}
