//! # Atrium Storage
//!
//! File access behind the [`StorageProvider`] trait, the per-plugin
//! [`ConfigStore`], and the [`HostSettings`] file the host starts from.
pub mod config;
pub mod error;
pub mod local;
pub mod provider;
pub mod settings;

/// Re-export key types
pub use config::{ConfigDocument, ConfigStore, default_config_dir};
pub use error::StorageSystemError;
pub use local::LocalStorageProvider;
pub use provider::StorageProvider;
pub use settings::{ConfigFormat, HostSettings};

// Test module declaration
#[cfg(test)]
mod tests;
