//! Error types for the scene crate

use thiserror::Error;

/// Result type alias for scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a scene
///
/// Gesture handling never fails; these only surface at startup.
#[derive(Debug, Error)]
pub enum Error {
    /// Asset scene could not be found by the asset source
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Asset scene loaded but the requested node is missing from it
    #[error("Node '{node}' not found in asset '{path}'")]
    NodeNotFound { node: String, path: String },

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config file could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
