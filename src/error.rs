//! Error types for chroma

use std::io;

use thiserror::Error;

/// Result type alias for chroma operations
pub type Result<T> = std::result::Result<T, ChromaError>;

/// Renderer error types
#[derive(Error, Debug)]
pub enum ChromaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Plugin '{plugin}' failed: {message}")]
    Plugin { plugin: String, message: String },

    #[error("Theme error: {0}")]
    Theme(String),

    #[error("Invalid setting '{key}': {value}")]
    InvalidSetting { key: String, value: String },

    #[error("{0}")]
    Message(String),
}

impl ChromaError {
    /// Build a plugin failure for `plugin`
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// True when the error is a closed pipe on the output side
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}
