//! # Atrium Core Errors
//!
//! Crate-level error type aggregating the typed errors of each subsystem.
//! Subsystem code returns its own error enum; callers that cross subsystem
//! boundaries (the manager, the host binary) work with [`Error`].
use crate::plugin_system::dependency::DependencyError;
use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed plugin system error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Dependency resolution failure surfaced to the host
    #[error("Dependency error: {0}")]
    Dependency(#[from] DependencyError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for Atrium core operations
pub type Result<T> = std::result::Result<T, Error>;
